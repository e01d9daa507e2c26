//! Billing period aggregation of delivery entries.
//!
//! [`summarize`] is a pure projection of entries, types and deliverers into one
//! [`DeliverySummary`] per deliverer. It never fails: items referencing an
//! unknown deliverer or delivery type are skipped so a single bad row cannot
//! blank out the whole report.

use std::collections::HashMap;

use crate::domain::deliverer::Deliverer;
use crate::domain::delivery_entry::DeliveryEntry;
use crate::domain::delivery_type::DeliveryType;
use crate::domain::period::BillingPeriod;
use crate::domain::summary::{DeliverySummary, TypeTotal};
use crate::domain::types::{DelivererId, DeliveryTypeId};

/// Builds the report rows for `period`, in the order of `deliverers`.
///
/// Every deliverer gets a summary and every type gets a row in each summary,
/// zero-filled when nothing was logged. Every item is paid at the value it was
/// logged with, so repricing a type leaves past payouts unchanged.
pub fn summarize(
    entries: &[DeliveryEntry],
    types: &[DeliveryType],
    deliverers: &[Deliverer],
    period: &BillingPeriod,
) -> Vec<DeliverySummary> {
    let type_index: HashMap<DeliveryTypeId, (usize, bool)> = types
        .iter()
        .enumerate()
        .map(|(idx, delivery_type)| (delivery_type.id, (idx, delivery_type.is_extra)))
        .collect();

    let mut summaries: Vec<DeliverySummary> = deliverers
        .iter()
        .map(|deliverer| empty_summary(deliverer, types))
        .collect();

    // First occurrence wins if the caller passes a deliverer twice.
    let mut summary_index: HashMap<DelivererId, usize> = HashMap::with_capacity(deliverers.len());
    for (idx, deliverer) in deliverers.iter().enumerate() {
        summary_index.entry(deliverer.id).or_insert(idx);
    }

    let mut regular_amounts = vec![0.0_f64; summaries.len()];

    for entry in entries.iter().filter(|entry| period.contains(entry.date)) {
        let Some(&summary_idx) = summary_index.get(&entry.deliverer_id) else {
            continue;
        };
        let summary = &mut summaries[summary_idx];

        for item in &entry.items {
            let Some(&(type_idx, is_extra)) = type_index.get(&item.type_id) else {
                continue;
            };
            let quantity = u64::from(item.quantity);

            summary.deliveries_by_type[type_idx].quantity += quantity;
            summary.total_deliveries += quantity;

            if is_extra {
                summary.total_extras += quantity;
                summary.extra_values += item.amount();
            } else {
                regular_amounts[summary_idx] += item.amount();
            }
        }
    }

    for (summary, regular) in summaries.iter_mut().zip(regular_amounts) {
        summary.total_value = regular + summary.extra_values;
    }

    summaries
}

fn empty_summary(deliverer: &Deliverer, types: &[DeliveryType]) -> DeliverySummary {
    DeliverySummary {
        deliverer_id: deliverer.id,
        deliverer_name: deliverer.name.as_str().to_string(),
        total_deliveries: 0,
        deliveries_by_type: types
            .iter()
            .map(|delivery_type| TypeTotal {
                type_id: delivery_type.id,
                type_name: delivery_type.name.as_str().to_string(),
                quantity: 0,
                value: delivery_type.unit_value.get(),
                is_extra: delivery_type.is_extra,
            })
            .collect(),
        total_extras: 0,
        extra_values: 0.0,
        total_value: 0.0,
    }
}
