#![cfg_attr(not(feature = "std"), no_std, no_main)]

/// # CampusStore — Fixed-Price Merch Storefront
///
/// **Role:** product registry, purchase gateway and revenue accumulator
/// for the campus store. Payment is pulled from the buyer through the
/// CampusCoin ledger's `transfer_from`, so a purchase needs a prior
/// `approve` for at least the product price.
///
/// The registry is overwrite-only: products are never deleted, only
/// deactivated via the `active` flag. Revenue sits on the store's own
/// coin balance until the owner withdraws it.
pub use self::campus_store::{CampusStore, CampusStoreRef, Error};

/// Static product catalog served to clients.
///
/// Display metadata and whole-token prices live off-chain; the contract
/// only ever sees `(id, price_in_base_units, active)`. Deploy tooling
/// seeds the registry from this table, scaling each price by
/// `campus_coin::campus_coin::UNIT`.
pub mod catalog {
    pub struct CatalogItem {
        pub id: u32,
        pub name: &'static str,
        pub description: &'static str,
        pub image: &'static str,
        /// Whole CAMP, unscaled.
        pub price: u128,
    }

    pub const DEFAULT_CATALOG: [CatalogItem; 6] = [
        CatalogItem {
            id: 1,
            name: "Campus Cap",
            description: "Embroidered cap with the campus crest.",
            image: "/merch/cap.png",
            price: 50,
        },
        CatalogItem {
            id: 2,
            name: "Campus T-Shirt",
            description: "Cotton t-shirt, campus print, multiple colors.",
            image: "/merch/tshirt.png",
            price: 75,
        },
        CatalogItem {
            id: 3,
            name: "Campus Hoodie",
            description: "Heavyweight hoodie for cooler weather.",
            image: "/merch/hoodie.png",
            price: 100,
        },
        CatalogItem {
            id: 4,
            name: "Campus Mug",
            description: "Ceramic mug with the campus skyline.",
            image: "/merch/mug.png",
            price: 25,
        },
        CatalogItem {
            id: 5,
            name: "Campus Notebook",
            description: "A5 notebook, crest on the cover.",
            image: "/merch/notebook.png",
            price: 35,
        },
        CatalogItem {
            id: 6,
            name: "Sticker Pack",
            description: "Ten vinyl stickers of campus artwork.",
            image: "/merch/stickers.png",
            price: 15,
        },
    ];
}

#[ink::contract]
pub mod campus_store {
    use campus_coin::{CampusCoinRef, Error as CoinError};
    use ink::env::call::FromAccountId;
    use ink::storage::Mapping;

    // =========================================================================
    // STORAGE
    // =========================================================================

    /// Registry entry. A missing entry reads as `(price: 0, active: false)`.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
    #[cfg_attr(
        feature = "std",
        derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
    )]
    pub struct Product {
        pub price: Balance,
        pub active: bool,
    }

    #[ink(storage)]
    pub struct CampusStore {
        owner: AccountId,
        /// CampusCoin ledger the store pulls payment from.
        token: AccountId,
        products: Mapping<u32, Product>,
        /// Monotonic analytics counters; only successful purchases move them.
        total_purchases: u64,
        total_revenue: Balance,
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    #[ink(event)]
    pub struct ProductUpdated {
        #[ink(topic)]
        id: u32,
        price: Balance,
        active: bool,
        set_by: AccountId,
    }

    #[ink(event)]
    pub struct ItemPurchased {
        #[ink(topic)]
        buyer: AccountId,
        #[ink(topic)]
        product_id: u32,
        price: Balance,
    }

    #[ink(event)]
    pub struct TokensWithdrawn {
        #[ink(topic)]
        to: AccountId,
        amount: Balance,
    }

    // =========================================================================
    // ERRORS
    // =========================================================================

    #[derive(Debug, PartialEq, Eq, scale::Encode, scale::Decode)]
    #[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
    pub enum Error {
        /// Caller is not the store owner.
        Unauthorized,
        /// Product id is unset or deactivated.
        ProductUnavailable,
        /// Product is stored with a zero price.
        InvalidPrice,
        /// Payer (or the store, on withdraw) holds less than required.
        InsufficientBalance,
        /// Buyer approved less than the product price.
        InsufficientAllowance,
        /// Ledger rejected the movement for a reason outside the taxonomy.
        PaymentFailed,
    }

    impl From<CoinError> for Error {
        fn from(err: CoinError) -> Self {
            match err {
                CoinError::InsufficientBalance => Error::InsufficientBalance,
                CoinError::InsufficientAllowance => Error::InsufficientAllowance,
                _ => Error::PaymentFailed,
            }
        }
    }

    impl CampusStore {
        #[ink(constructor)]
        pub fn new(token: AccountId) -> Self {
            Self {
                owner: Self::env().caller(),
                token,
                products: Mapping::default(),
                total_purchases: 0,
                total_revenue: 0,
            }
        }

        // =================================================================
        // PRODUCT REGISTRY
        // =================================================================

        /// Create or overwrite the registry entry for `id`.
        ///
        /// A zero price is storable but blocks purchases until repriced.
        #[ink(message)]
        pub fn set_product(&mut self, id: u32, price: Balance, active: bool) -> Result<(), Error> {
            self.only_owner()?;
            self.products.insert(id, &Product { price, active });
            self.env().emit_event(ProductUpdated {
                id,
                price,
                active,
                set_by: self.env().caller(),
            });
            Ok(())
        }

        #[ink(message)]
        pub fn get_product(&self, id: u32) -> (Balance, bool) {
            let product = self.products.get(id).unwrap_or_default();
            (product.price, product.active)
        }

        // =================================================================
        // PURCHASE FLOW
        // =================================================================

        /// Buy one unit of product `id` at its listed price.
        ///
        /// Preconditions run in order: active flag, nonzero price, then the
        /// ledger pull itself. Balance and allowance are not pre-checked
        /// here; the ledger's own rejection is surfaced, so either every
        /// effect lands (payment plus analytics) or none do.
        #[ink(message)]
        pub fn purchase_item(&mut self, id: u32) -> Result<(), Error> {
            let buyer = self.env().caller();
            let product = self.products.get(id).unwrap_or_default();

            if !product.active {
                return Err(Error::ProductUnavailable);
            }
            if product.price == 0 {
                return Err(Error::InvalidPrice);
            }

            let store = self.env().account_id();
            self.ledger().transfer_from(buyer, store, product.price)?;

            self.total_purchases = self.total_purchases.saturating_add(1);
            self.total_revenue = self.total_revenue.saturating_add(product.price);

            self.env().emit_event(ItemPurchased {
                buyer,
                product_id: id,
                price: product.price,
            });
            Ok(())
        }

        // =================================================================
        // REVENUE WITHDRAWAL
        // =================================================================

        /// Move revenue from the store to the owner.
        ///
        /// `amount == 0` is the drain-everything sentinel; with an empty
        /// store it degrades to a successful no-op. Returns the amount
        /// actually paid out.
        #[ink(message)]
        pub fn withdraw(&mut self, amount: Balance) -> Result<Balance, Error> {
            self.only_owner()?;

            let held = self.ledger().balance_of(self.env().account_id());
            let payout = if amount == 0 { held } else { amount };
            if payout > held {
                return Err(Error::InsufficientBalance);
            }

            self.ledger().transfer(self.owner, payout)?;
            self.env().emit_event(TokensWithdrawn {
                to: self.owner,
                amount: payout,
            });
            Ok(payout)
        }

        // =================================================================
        // VIEW FUNCTIONS
        // =================================================================

        /// (purchase count, cumulative revenue, live coin balance of the store).
        #[ink(message)]
        pub fn get_store_stats(&self) -> (u64, Balance, Balance) {
            let held = self.ledger().balance_of(self.env().account_id());
            (self.total_purchases, self.total_revenue, held)
        }

        #[ink(message)]
        pub fn total_purchases(&self) -> u64 {
            self.total_purchases
        }

        #[ink(message)]
        pub fn total_revenue(&self) -> Balance {
            self.total_revenue
        }

        #[ink(message)]
        pub fn token(&self) -> AccountId {
            self.token
        }

        #[ink(message)]
        pub fn owner(&self) -> AccountId {
            self.owner
        }

        // =================================================================
        // INTERNALS
        // =================================================================

        fn ledger(&self) -> CampusCoinRef {
            CampusCoinRef::from_account_id(self.token)
        }

        fn only_owner(&self) -> Result<(), Error> {
            if self.env().caller() != self.owner {
                return Err(Error::Unauthorized);
            }
            Ok(())
        }
    }

    // =========================================================================
    // UNIT TESTS
    // =========================================================================
    //
    // The off-chain environment cannot dispatch cross-contract calls, so
    // everything touching the coin ledger (payment pull, withdrawal, live
    // balance) lives in the e2e suite below. The registry, the purchase
    // preconditions and the owner gates are all testable here.


    // =========================================================================
    // END-TO-END TESTS
    // =========================================================================

}
