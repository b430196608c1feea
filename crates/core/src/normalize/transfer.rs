use onchain_etl_provider::{QueryVariant, RawTrade};

use super::fields::{float, integer, required, text};
use super::{FieldError, Normalizer};
use crate::records::TransferRecord;

/// Wei in one ether; the provider reports `value` in wei.
pub const WEI_PER_ETHER: f64 = 1e18;

/// Maps the address-based transfer shape onto the `transactions` schema.
///
/// `hash` and `value` are required. `from`, `to` and `block` are read
/// null-safely and never appear in the output row.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransferNormalizer;

impl Normalizer for TransferNormalizer {
    type Record = TransferRecord;

    fn variant(&self) -> QueryVariant {
        QueryVariant::Transfers
    }

    fn normalize_record(&self, raw: &RawTrade) -> Result<TransferRecord, FieldError> {
        let tx_hash = text(Some(required(raw, "hash")?), "hash")?
            .ok_or_else(|| FieldError::invalid("hash", "natural key is null"))?;

        let wei = float(Some(required(raw, "value")?), "value")?
            .ok_or_else(|| FieldError::invalid("value", "value is null"))?;

        let block = raw.get("block");

        Ok(TransferRecord {
            tx_hash,
            from_address: text(raw.get("from").and_then(|f| f.get("address")), "from.address")?,
            to_address: text(raw.get("to").and_then(|t| t.get("address")), "to.address")?,
            value: wei / WEI_PER_ETHER,
            gas: integer(raw.get("gas"), "gas")?,
            gas_price: float(raw.get("gas_price"), "gas_price")?,
            timestamp: text(
                block
                    .and_then(|b| b.get("timestamp"))
                    .and_then(|t| t.get("time")),
                "block.timestamp.time",
            )?,
            block_height: integer(block.and_then(|b| b.get("height")), "block.height")?,
        })
    }
}
