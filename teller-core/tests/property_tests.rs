//! Property tests for the validators and account arithmetic

use proptest::prelude::*;
use rust_decimal::Decimal;

use teller_core::domain::amount::from_cents;
use teller_core::{is_amount_valid, is_email_valid, Account};

/// Positive whole-cent amounts up to ten million
fn cents() -> impl Strategy<Value = i64> {
    1i64..1_000_000_000
}

fn local_part() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{1,12}"
}

fn domain() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{1,10}(\\.[a-zA-Z0-9]{1,6}){1,3}"
}

proptest! {
    #[test]
    fn well_formed_emails_are_valid(local in local_part(), domain in domain()) {
        let email = format!("{}@{}", local, domain);
        prop_assert!(is_email_valid(&email));
    }

    #[test]
    fn emails_with_a_space_are_invalid(local in local_part(), domain in domain(), at in 0usize..8) {
        let mut email = format!("{}@{}", local, domain);
        let at = at.min(email.len());
        email.insert(at, ' ');
        prop_assert!(!is_email_valid(&email));
    }

    #[test]
    fn emails_with_two_ats_are_invalid(local in local_part(), domain in domain()) {
        let double_at = format!("{}@@{}", local, domain);
        prop_assert!(!is_email_valid(&double_at));
        let two_ats = format!("{}@{}@{}", local, local, domain);
        prop_assert!(!is_email_valid(&two_ats));
    }

    #[test]
    fn emails_with_double_dots_are_invalid(local in local_part(), domain in domain()) {
        let double_dot = format!("{}@{}..com", local, domain);
        prop_assert!(!is_email_valid(&double_dot));
    }

    #[test]
    fn whole_cent_amounts_are_valid(c in cents()) {
        prop_assert!(is_amount_valid(from_cents(c)));
    }

    #[test]
    fn sub_cent_amounts_are_invalid(c in cents(), mills in 1i64..10) {
        // c cents plus 1..9 thousandths of a cent
        let amount = Decimal::new(c * 10 + mills, 3);
        prop_assert!(!is_amount_valid(amount));
    }

    #[test]
    fn non_positive_amounts_are_invalid(c in 0i64..1_000_000_000) {
        prop_assert!(!is_amount_valid(from_cents(-c)));
    }

    #[test]
    fn deposit_then_withdraw_restores_balance(start in cents(), x in cents()) {
        let mut account = Account::new("a@b.com", from_cents(start)).unwrap();
        account.deposit(from_cents(x)).unwrap();
        account.withdraw(from_cents(x)).unwrap();
        prop_assert_eq!(account.balance(), from_cents(start));
    }

    #[test]
    fn transfer_preserves_total(a in cents(), b in cents(), x in cents()) {
        let mut source = Account::new("a@b.com", from_cents(a)).unwrap();
        let mut target = Account::new("c@d.com", from_cents(b)).unwrap();
        let total = source.balance() + target.balance();

        let result = source.transfer(&mut target, from_cents(x));

        if x <= a {
            prop_assert!(result.is_ok());
            prop_assert_eq!(source.balance(), from_cents(a - x));
            prop_assert_eq!(target.balance(), from_cents(b + x));
        } else {
            prop_assert!(result.unwrap_err().is_insufficient_funds());
            prop_assert_eq!(source.balance(), from_cents(a));
            prop_assert_eq!(target.balance(), from_cents(b));
        }
        prop_assert_eq!(source.balance() + target.balance(), total);
    }

    #[test]
    fn overdrawn_withdraw_leaves_balance(start in cents(), extra in cents()) {
        let mut account = Account::new("a@b.com", from_cents(start)).unwrap();
        prop_assert!(account.withdraw(from_cents(start + extra)).is_err());
        prop_assert_eq!(account.balance(), from_cents(start));
    }
}
