/// Failures raised by the accounting engine itself.
///
/// Contracts map these onto their own `#[contracterror]` codes through `From`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LedgerError {
    /// Schedule or reservation parameters are malformed
    InvalidConfiguration,
    /// Amount must be positive and must price to at least one token unit
    InvalidAmount,
    /// Mint would push `minted` past `reserved`
    PoolExhausted,
    /// Intermediate arithmetic left the i128 range
    Overflow,
}
