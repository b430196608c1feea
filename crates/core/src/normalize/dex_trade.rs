use onchain_etl_provider::{QueryVariant, RawTrade};

use super::fields::{float, integer, nullable_nested, required, required_nested, text};
use super::{FieldError, Normalizer};
use crate::records::DexTradeRecord;

/// Maps the DEX-trade shape onto the `dex_trades` schema.
///
/// Every key the query selects must be present; a missing one drops the
/// record. Currency objects may be `null`, in which case the symbol is NULL.
/// USD amounts pass through as the provider computed them.
#[derive(Debug, Clone, Copy, Default)]
pub struct DexTradeNormalizer;

impl Normalizer for DexTradeNormalizer {
    type Record = DexTradeRecord;

    fn variant(&self) -> QueryVariant {
        QueryVariant::DexTrades
    }

    fn normalize_record(&self, raw: &RawTrade) -> Result<DexTradeRecord, FieldError> {
        let transaction_hash = text(
            Some(required_nested(raw, "transaction", "hash")?),
            "transaction.hash",
        )?
        .ok_or_else(|| FieldError::invalid("transaction.hash", "natural key is null"))?;

        Ok(DexTradeRecord {
            date: text(Some(required_nested(raw, "date", "date")?), "date.date")?,
            buy_amount: float(Some(required(raw, "buyAmount")?), "buyAmount")?,
            buy_amount_in_usd: float(Some(required(raw, "buyAmountInUsd")?), "buyAmountInUsd")?,
            buy_currency: text(
                nullable_nested(raw, "buyCurrency", "symbol")?,
                "buyCurrency.symbol",
            )?,
            sell_amount: float(Some(required(raw, "sellAmount")?), "sellAmount")?,
            sell_amount_in_usd: float(
                Some(required(raw, "sellAmountInUsd")?),
                "sellAmountInUsd",
            )?,
            sell_currency: text(
                nullable_nested(raw, "sellCurrency", "symbol")?,
                "sellCurrency.symbol",
            )?,
            trade_amount: float(Some(required(raw, "tradeAmount")?), "tradeAmount")?,
            transaction_hash,
            gas_value: float(
                Some(required_nested(raw, "transaction", "gasValue")?),
                "transaction.gasValue",
            )?,
            gas_price: float(
                Some(required_nested(raw, "transaction", "gasPrice")?),
                "transaction.gasPrice",
            )?,
            gas_used: integer(
                Some(required_nested(raw, "transaction", "gas")?),
                "transaction.gas",
            )?,
        })
    }
}
