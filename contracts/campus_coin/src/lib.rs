#![cfg_attr(not(feature = "std"), no_std, no_main)]

/// # CampusCoin — Campus Store Ledger
///
/// **Role:** ground-truth balance ledger for the campus store. ERC-20
/// surface (transfer / approve / transfer_from) plus two supply faucets:
/// a one-time free claim any account can take once, and an owner-gated
/// mint for topping up test wallets and rewards.
///
/// Supply starts at zero; only `register` and `mint` create tokens.
///
/// **Units:** 12 fractional digits per whole CAMP (fee accounting on the
/// settlement layer assumes 10^12 base units per token). UI-level whole
/// prices must be scaled by `UNIT` before they reach the chain.
pub use self::campus_coin::{CampusCoin, CampusCoinRef, Error};

#[ink::contract]
pub mod campus_coin {
    use ink::prelude::string::String;
    use ink::storage::Mapping;

    // =========================================================================
    // CONSTANTS
    // =========================================================================

    /// Fractional base units per whole CAMP (12 decimals).
    pub const UNIT: Balance = 1_000_000_000_000;

    /// One-time claim granted by `register`: 1000 CAMP.
    pub const CLAIM_AMOUNT: Balance = 1_000 * UNIT;

    /// Token decimals reported to clients.
    pub const DECIMALS: u8 = 12;

    // =========================================================================
    // STORAGE
    // =========================================================================

    #[ink(storage)]
    pub struct CampusCoin {
        total_supply: Balance,
        balances: Mapping<AccountId, Balance>,
        allowances: Mapping<(AccountId, AccountId), Balance>,
        /// Lazily created; absent means the account has never claimed.
        claimed: Mapping<AccountId, bool>,
        name: String,
        symbol: String,
        owner: AccountId,
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    #[ink(event)]
    pub struct Transfer {
        #[ink(topic)]
        from: Option<AccountId>,
        #[ink(topic)]
        to: Option<AccountId>,
        value: Balance,
    }

    #[ink(event)]
    pub struct Approval {
        #[ink(topic)]
        owner: AccountId,
        #[ink(topic)]
        spender: AccountId,
        value: Balance,
    }

    #[ink(event)]
    pub struct UserRegistered {
        #[ink(topic)]
        account: AccountId,
        amount: Balance,
    }

    // =========================================================================
    // ERRORS
    // =========================================================================

    #[derive(Debug, PartialEq, Eq, scale::Encode, scale::Decode)]
    #[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
    pub enum Error {
        /// Caller is not the contract owner.
        Unauthorized,
        /// Caller has already taken the one-time claim.
        AlreadyClaimed,
        InsufficientBalance,
        InsufficientAllowance,
        Overflow,
    }

    impl CampusCoin {
        #[ink(constructor)]
        pub fn new() -> Self {
            let caller = Self::env().caller();
            Self {
                total_supply: 0,
                balances: Mapping::default(),
                allowances: Mapping::default(),
                claimed: Mapping::default(),
                name: String::from("CampusCoin"),
                symbol: String::from("CAMP"),
                owner: caller,
            }
        }

        // =================================================================
        // METADATA
        // =================================================================

        #[ink(message)]
        pub fn name(&self) -> String {
            self.name.clone()
        }

        #[ink(message)]
        pub fn symbol(&self) -> String {
            self.symbol.clone()
        }

        #[ink(message)]
        pub fn decimals(&self) -> u8 {
            DECIMALS
        }

        #[ink(message)]
        pub fn owner(&self) -> AccountId {
            self.owner
        }

        // =================================================================
        // LEDGER VIEWS
        // =================================================================

        #[ink(message)]
        pub fn total_supply(&self) -> Balance {
            self.total_supply
        }

        #[ink(message)]
        pub fn balance_of(&self, account: AccountId) -> Balance {
            self.balances.get(account).unwrap_or(0)
        }

        #[ink(message)]
        pub fn allowance(&self, owner: AccountId, spender: AccountId) -> Balance {
            self.allowances.get((owner, spender)).unwrap_or(0)
        }

        #[ink(message)]
        pub fn has_claimed(&self, account: AccountId) -> bool {
            self.claimed.get(account).unwrap_or(false)
        }

        // =================================================================
        // SUPPLY FAUCETS
        // =================================================================

        /// One-time claim of `CLAIM_AMOUNT` for the caller.
        ///
        /// The claim flag is checked and set within this single message, so
        /// the check-and-set is atomic under the host's serialization.
        #[ink(message)]
        pub fn register(&mut self) -> Result<(), Error> {
            let caller = self.env().caller();
            if self.claimed.get(caller).unwrap_or(false) {
                return Err(Error::AlreadyClaimed);
            }
            self.claimed.insert(caller, &true);
            self.mint_to(caller, CLAIM_AMOUNT)?;
            self.env().emit_event(UserRegistered {
                account: caller,
                amount: CLAIM_AMOUNT,
            });
            Ok(())
        }

        /// Owner-gated mint to an arbitrary account.
        #[ink(message)]
        pub fn mint(&mut self, to: AccountId, amount: Balance) -> Result<(), Error> {
            self.only_owner()?;
            self.mint_to(to, amount)
        }

        // =================================================================
        // ERC-20 SURFACE
        // =================================================================

        #[ink(message)]
        pub fn approve(&mut self, spender: AccountId, value: Balance) -> Result<(), Error> {
            let owner = self.env().caller();
            self.allowances.insert((owner, spender), &value);
            self.env().emit_event(Approval {
                owner,
                spender,
                value,
            });
            Ok(())
        }

        #[ink(message)]
        pub fn transfer(&mut self, to: AccountId, value: Balance) -> Result<(), Error> {
            let from = self.env().caller();
            self.process_transfer(from, to, value)
        }

        #[ink(message)]
        pub fn transfer_from(
            &mut self,
            from: AccountId,
            to: AccountId,
            value: Balance,
        ) -> Result<(), Error> {
            let caller = self.env().caller();
            let allowance = self.allowance(from, caller);
            if allowance < value {
                return Err(Error::InsufficientAllowance);
            }
            // Decrement the allowance before moving funds; a failed transfer
            // reverts the whole message, allowance included.
            self.allowances.insert((from, caller), &(allowance - value));
            self.process_transfer(from, to, value)
        }

        // =================================================================
        // INTERNALS
        // =================================================================

        fn process_transfer(
            &mut self,
            from: AccountId,
            to: AccountId,
            value: Balance,
        ) -> Result<(), Error> {
            let from_bal = self.balances.get(from).unwrap_or(0);
            if from_bal < value {
                return Err(Error::InsufficientBalance);
            }

            // Write `from` first so a self-transfer reads the decremented
            // balance on the `to` side.
            self.balances.insert(from, &(from_bal - value));
            let to_bal = self.balances.get(to).unwrap_or(0);
            self.balances.insert(to, &(to_bal + value));

            self.env().emit_event(Transfer {
                from: Some(from),
                to: Some(to),
                value,
            });
            Ok(())
        }

        fn mint_to(&mut self, to: AccountId, amount: Balance) -> Result<(), Error> {
            self.total_supply = self
                .total_supply
                .checked_add(amount)
                .ok_or(Error::Overflow)?;
            let to_bal = self.balances.get(to).unwrap_or(0);
            self.balances.insert(to, &(to_bal + amount));

            self.env().emit_event(Transfer {
                from: None,
                to: Some(to),
                value: amount,
            });
            Ok(())
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

    #[cfg(test)]
    mod tests {
        use super::*;
        use ink::env::{test, DefaultEnvironment};

        type Env = DefaultEnvironment;

        fn accounts() -> test::DefaultAccounts<Env> {
            test::default_accounts::<Env>()
        }

        fn set_caller(addr: AccountId) {
            test::set_caller::<Env>(addr);
        }

        /// Alice deploys and is therefore the owner.
        fn deploy() -> CampusCoin {
            set_caller(accounts().alice);
            CampusCoin::new()
        }

        // ── Deployment ───────────────────────────────────────────────────────

        #[ink::test]
        fn new_coin_starts_empty() {
            let coin = deploy();
            assert_eq!(coin.total_supply(), 0);
            assert_eq!(coin.balance_of(accounts().alice), 0);
        }

        #[ink::test]
        fn deployer_is_owner() {
            let coin = deploy();
            assert_eq!(coin.owner(), accounts().alice);
        }

        #[ink::test]
        fn metadata_reports_twelve_decimals() {
            let coin = deploy();
            assert_eq!(coin.name(), "CampusCoin");
            assert_eq!(coin.symbol(), "CAMP");
            assert_eq!(coin.decimals(), 12);
        }

        // ── One-time claim ───────────────────────────────────────────────────

        #[ink::test]
        fn register_grants_claim_amount() {
            let mut coin = deploy();
            let accs = accounts();

            set_caller(accs.bob);
            coin.register().unwrap();

            assert_eq!(coin.balance_of(accs.bob), CLAIM_AMOUNT);
            assert_eq!(coin.balance_of(accs.bob), 1_000 * 10u128.pow(12));
            assert!(coin.has_claimed(accs.bob));
            assert_eq!(coin.total_supply(), CLAIM_AMOUNT);
        }

        #[ink::test]
        fn register_twice_fails_and_changes_nothing() {
            let mut coin = deploy();
            let accs = accounts();

            set_caller(accs.bob);
            coin.register().unwrap();
            let result = coin.register();

            assert_eq!(result, Err(Error::AlreadyClaimed));
            assert_eq!(coin.balance_of(accs.bob), CLAIM_AMOUNT);
            assert_eq!(coin.total_supply(), CLAIM_AMOUNT);
            assert!(coin.has_claimed(accs.bob));
        }

        #[ink::test]
        fn register_is_independent_per_account() {
            let mut coin = deploy();
            let accs = accounts();

            set_caller(accs.bob);
            coin.register().unwrap();
            set_caller(accs.charlie);
            coin.register().unwrap();

            assert_eq!(coin.balance_of(accs.bob), CLAIM_AMOUNT);
            assert_eq!(coin.balance_of(accs.charlie), CLAIM_AMOUNT);
            assert_eq!(coin.total_supply(), 2 * CLAIM_AMOUNT);
        }

        #[ink::test]
        fn unclaimed_account_reads_false() {
            let coin = deploy();
            assert!(!coin.has_claimed(accounts().eve));
        }

        // ── Owner mint ───────────────────────────────────────────────────────

        #[ink::test]
        fn mint_credits_target_and_supply() {
            let mut coin = deploy();
            let accs = accounts();

            coin.mint(accs.bob, 5_000 * UNIT).unwrap();

            assert_eq!(coin.balance_of(accs.bob), 5_000 * UNIT);
            assert_eq!(coin.total_supply(), 5_000 * UNIT);
        }

        #[ink::test]
        fn mint_rejects_non_owner() {
            let mut coin = deploy();
            let accs = accounts();

            set_caller(accs.bob);
            let result = coin.mint(accs.charlie, 1_000 * UNIT);

            assert_eq!(result, Err(Error::Unauthorized));
            assert_eq!(coin.balance_of(accs.charlie), 0);
            assert_eq!(coin.total_supply(), 0);
        }

        // ── Transfers ────────────────────────────────────────────────────────

        #[ink::test]
        fn transfer_moves_balance() {
            let mut coin = deploy();
            let accs = accounts();
            coin.mint(accs.bob, 100 * UNIT).unwrap();

            set_caller(accs.bob);
            coin.transfer(accs.charlie, 40 * UNIT).unwrap();

            assert_eq!(coin.balance_of(accs.bob), 60 * UNIT);
            assert_eq!(coin.balance_of(accs.charlie), 40 * UNIT);
            assert_eq!(coin.total_supply(), 100 * UNIT);
        }

        #[ink::test]
        fn transfer_rejects_overdraw() {
            let mut coin = deploy();
            let accs = accounts();
            coin.mint(accs.bob, 10 * UNIT).unwrap();

            set_caller(accs.bob);
            let result = coin.transfer(accs.charlie, 11 * UNIT);

            assert_eq!(result, Err(Error::InsufficientBalance));
            assert_eq!(coin.balance_of(accs.bob), 10 * UNIT);
            assert_eq!(coin.balance_of(accs.charlie), 0);
        }

        #[ink::test]
        fn zero_value_transfer_is_a_noop() {
            let mut coin = deploy();
            let accs = accounts();

            set_caller(accs.bob);
            coin.transfer(accs.charlie, 0).unwrap();
            assert_eq!(coin.balance_of(accs.charlie), 0);
        }

        // ── Allowances ───────────────────────────────────────────────────────

        #[ink::test]
        fn approve_sets_allowance() {
            let mut coin = deploy();
            let accs = accounts();

            set_caller(accs.bob);
            coin.approve(accs.charlie, 50 * UNIT).unwrap();

            assert_eq!(coin.allowance(accs.bob, accs.charlie), 50 * UNIT);
            assert_eq!(coin.allowance(accs.charlie, accs.bob), 0);
        }

        #[ink::test]
        fn transfer_from_spends_allowance() {
            let mut coin = deploy();
            let accs = accounts();
            coin.mint(accs.bob, 100 * UNIT).unwrap();

            set_caller(accs.bob);
            coin.approve(accs.charlie, 50 * UNIT).unwrap();
            set_caller(accs.charlie);
            coin.transfer_from(accs.bob, accs.django, 30 * UNIT).unwrap();

            assert_eq!(coin.balance_of(accs.bob), 70 * UNIT);
            assert_eq!(coin.balance_of(accs.django), 30 * UNIT);
            assert_eq!(coin.allowance(accs.bob, accs.charlie), 20 * UNIT);
        }

        #[ink::test]
        fn transfer_from_rejects_excess_of_allowance() {
            let mut coin = deploy();
            let accs = accounts();
            coin.mint(accs.bob, 100 * UNIT).unwrap();

            set_caller(accs.bob);
            coin.approve(accs.charlie, 10 * UNIT).unwrap();
            set_caller(accs.charlie);
            let result = coin.transfer_from(accs.bob, accs.django, 30 * UNIT);

            assert_eq!(result, Err(Error::InsufficientAllowance));
            assert_eq!(coin.balance_of(accs.bob), 100 * UNIT);
            assert_eq!(coin.allowance(accs.bob, accs.charlie), 10 * UNIT);
        }

        #[ink::test]
        fn transfer_from_rejects_overdraw_despite_allowance() {
            let mut coin = deploy();
            let accs = accounts();
            coin.mint(accs.bob, 10 * UNIT).unwrap();

            set_caller(accs.bob);
            coin.approve(accs.charlie, 50 * UNIT).unwrap();
            set_caller(accs.charlie);
            let result = coin.transfer_from(accs.bob, accs.django, 30 * UNIT);

            assert_eq!(result, Err(Error::InsufficientBalance));
            assert_eq!(coin.balance_of(accs.bob), 10 * UNIT);
        }
    }
}
