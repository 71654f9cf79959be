use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/* Quantity weighted average of the current position and a new lot:

average' = (quantity * average + added_quantity * added_price) / (quantity + added_quantity)

An empty result (both quantities at zero) keeps the previous average. None when the total cost
or quantity does not fit in a Decimal.
*/
pub fn weighted_average_price(
    quantity: Decimal,
    average_price: Decimal,
    added_quantity: Decimal,
    added_price: Decimal,
) -> Option<Decimal> {
    let total_quantity = quantity.checked_add(added_quantity)?;
    let total_cost = quantity
        .checked_mul(average_price)?
        .checked_add(added_quantity.checked_mul(added_price)?)?;
    Some(total_cost.checked_div(total_quantity).unwrap_or(average_price))
}

/* (sale_price - average_price) * quantity */
pub fn realized_profit(sale_price: Decimal, average_price: Decimal, quantity: Decimal) -> Decimal {
    (sale_price - average_price) * quantity
}

/* realized_profit / (average_price * quantity), zero when nothing was paid for the units */
pub fn profit_rate(realized_profit: Decimal, average_price: Decimal, quantity: Decimal) -> Decimal {
    ratio_or_zero(realized_profit, average_price * quantity)
}

/* Division that never panics: a zero or negative denominator gives 0 */
pub fn ratio_or_zero(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator <= dec!(0) {
        return dec!(0);
    }
    numerator.checked_div(denominator).unwrap_or(dec!(0))
}
