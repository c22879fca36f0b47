use std::cmp::Reverse;

use super::{Amount, Operation};

/// Apply one operation to a balance: balance + credit - debit.
/// Returns `None` when the result does not fit in an amount.
pub fn apply_operation(balance: Amount, operation: &Operation) -> Option<Amount> {
    operation
        .net_amount()
        .and_then(|net| balance.checked_add(net))
}

/// Sort operations most recent first.
/// The sort is stable: operations sharing a timestamp keep their relative order.
pub fn sort_most_recent_first(operations: &mut [Operation]) {
    operations.sort_by_key(|operation| Reverse(operation.timestamp()));
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal_macros::dec;

    use super::*;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2018, 3, day, 0, 0, 0).unwrap()
    }

    fn fold(operations: &[Operation]) -> Option<Amount> {
        operations
            .iter()
            .try_fold(Amount::ZERO, |balance, operation| {
                apply_operation(balance, operation)
            })
    }

    #[test]
    fn test_apply_operation() {
        let deposit = Operation::deposit("12345", dec!(12.50), at(12));
        let withdrawal = Operation::withdrawal("12345", dec!(6.00), at(14));

        assert_eq!(apply_operation(Amount::ZERO, &deposit), Some(dec!(12.50)));
        assert_eq!(apply_operation(Amount::ZERO, &withdrawal), Some(dec!(-6.00)));
    }

    #[test]
    fn test_balance_of_mixed_operations() {
        let operations = vec![
            Operation::deposit("12345", dec!(12.50), at(12)),
            Operation::withdrawal("12345", dec!(6.00), at(14)),
            Operation::deposit("12345", dec!(50.75), at(13)),
        ];

        assert_eq!(fold(&operations), Some(dec!(57.25)));
        assert_eq!(fold(&operations).unwrap().to_string(), "57.25");
    }

    #[test]
    fn test_balance_is_order_independent() {
        let mut operations = vec![
            Operation::withdrawal("12345", dec!(100), at(1)),
            Operation::deposit("12345", dec!(0.10), at(2)),
            Operation::deposit("12345", dec!(0.20), at(3)),
        ];
        let forward = fold(&operations);
        operations.reverse();

        assert_eq!(forward, Some(dec!(-99.70)));
        assert_eq!(fold(&operations), forward);
    }

    #[test]
    fn test_apply_operation_overflow() {
        let deposit = Operation::deposit("12345", dec!(1), at(12));
        let withdrawal = Operation::withdrawal("12345", dec!(1), at(12));

        assert_eq!(apply_operation(Amount::MAX, &deposit), None);
        assert_eq!(apply_operation(Amount::MIN, &withdrawal), None);
        assert_eq!(
            apply_operation(Amount::MAX, &withdrawal),
            Some(Amount::MAX - dec!(1))
        );
    }

    #[test]
    fn test_sort_most_recent_first() {
        let mut operations = vec![
            Operation::deposit("12345", dec!(1), at(12)),
            Operation::deposit("12345", dec!(3), at(14)),
            Operation::deposit("12345", dec!(2), at(13)),
        ];

        sort_most_recent_first(&mut operations);

        let days: Vec<_> = operations.iter().map(|o| o.timestamp()).collect();
        assert_eq!(days, vec![at(14), at(13), at(12)]);
    }

    #[test]
    fn test_sort_keeps_insertion_order_on_ties() {
        let first = Operation::deposit("12345", dec!(1), at(12));
        let second = Operation::withdrawal("12345", dec!(1), at(12));
        let mut operations = vec![first.clone(), second.clone()];

        sort_most_recent_first(&mut operations);

        assert_eq!(operations, vec![first, second]);
    }
}
