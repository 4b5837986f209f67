//! Offer aggregation
//!
//! Reduces the offers of one snapshot into raw accumulations: sums, the
//! per-offer fee list, size lists, per-order-type counts, the relative and
//! absolute fee subsets, and the set of maker identities. Nothing here
//! computes a statistic; see [`crate::statistics`].

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use types::fee::OrderType;
use types::ids::Counterparty;
use types::offer::Offer;

/// Raw accumulations over the offers of one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfferAggregate {
    pub total_offers: u64,
    /// Sum of `maxsize`.
    pub total_liquidity: i64,
    /// Fee in sats for every offer, in offer order (0 when uninterpretable).
    pub fees: Vec<f64>,
    /// `maxsize` of every offer.
    pub order_sizes: Vec<i64>,
    pub min_order_sizes: Vec<i64>,
    pub max_order_sizes: Vec<i64>,
    /// Offer count per order-type tag.
    pub order_type_counts: BTreeMap<String, u64>,
    /// Fees in sats of relative offers whose encoding parsed.
    pub relative_fees_satoshis: Vec<f64>,
    /// Raw fractions of relative offers whose encoding parsed.
    pub relative_fees_ratios: Vec<f64>,
    /// Fees in sats of absolute offers whose encoding parsed.
    pub absolute_fees: Vec<f64>,
    pub unique_makers: BTreeSet<Counterparty>,
}

/// Incremental offer aggregator.
#[derive(Debug, Default)]
pub struct OfferAggregator {
    aggregate: OfferAggregate,
}

impl OfferAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one offer into the accumulations.
    pub fn record(&mut self, offer: &Offer) {
        let agg = &mut self.aggregate;

        agg.total_offers += 1;
        agg.total_liquidity = agg.total_liquidity.saturating_add(offer.maxsize);

        agg.order_sizes.push(offer.maxsize);
        agg.min_order_sizes.push(offer.minsize);
        agg.max_order_sizes.push(offer.maxsize);

        let quote = offer.fee_quote();
        agg.fees.push(quote.map(|q| q.satoshis).unwrap_or(0.0));

        if let Some(quote) = quote {
            match offer.ordertype {
                OrderType::Relative => {
                    if let Some(ratio) = quote.ratio {
                        agg.relative_fees_ratios.push(ratio);
                    }
                    agg.relative_fees_satoshis.push(quote.satoshis);
                }
                OrderType::Absolute => agg.absolute_fees.push(quote.satoshis),
                OrderType::Other(_) => {}
            }
        }

        *agg
            .order_type_counts
            .entry(offer.ordertype.as_tag().to_string())
            .or_insert(0) += 1;

        agg.unique_makers.insert(offer.counterparty.clone());
    }

    /// Fold a batch of offers, in order.
    pub fn ingest(&mut self, offers: &[Offer]) {
        for offer in offers {
            self.record(offer);
        }
    }

    pub fn finish(self) -> OfferAggregate {
        self.aggregate
    }
}

/// Aggregate a whole offer list.
pub fn aggregate_offers(offers: &[Offer]) -> OfferAggregate {
    let mut aggregator = OfferAggregator::new();
    aggregator.ingest(offers);
    aggregator.finish()
}
