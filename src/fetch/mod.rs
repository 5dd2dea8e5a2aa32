use crate::error::FetchError;
use crate::symbol::Symbol;

pub mod coingecko;
pub mod decode;

pub use coingecko::CoinGeckoClient;

/// Source of a single current price for a symbol.
///
/// Implementations do not record anything; the caller timestamps the quote
/// and appends it to the history.
pub trait QuoteSource {
    fn fetch(&self, symbol: &Symbol) -> Result<f64, FetchError>;
}

