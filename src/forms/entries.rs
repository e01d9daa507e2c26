//! Entry submission form and its validation rules.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::delivery_entry::{DeliveryItem, NewDeliveryEntry};
use crate::domain::delivery_type::{DeliveryType, find_extra_type};
use crate::domain::types::{DelivererId, DeliveryTypeId, HubId, UnitValue};
use crate::forms::FormError;

/// Raw submission: one `type_id`/`quantity` pair per regular type and one
/// `extra_quantity`/`extra_value` pair per extra row, all repeated fields.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitEntryForm {
    pub date: String,
    #[serde(default)]
    pub type_id: Vec<i32>,
    #[serde(default)]
    pub quantity: Vec<String>,
    #[serde(default)]
    pub extra_quantity: Vec<String>,
    #[serde(default)]
    pub extra_value: Vec<String>,
}

impl SubmitEntryForm {
    /// Decodes an urlencoded body with repeated keys.
    pub fn from_bytes(body: &[u8]) -> Result<Self, FormError> {
        serde_html_form::from_bytes(body).map_err(|err| {
            log::debug!("Malformed entry form: {err}");
            FormError::Malformed
        })
    }
}

/// Submission with every field parsed but not yet checked against the hub's
/// delivery types.
#[derive(Debug)]
pub struct SubmitEntryPayload {
    pub date: NaiveDate,
    pub regular: Vec<(DeliveryTypeId, u32)>,
    pub extras: Vec<(u32, f64)>,
}

impl TryFrom<SubmitEntryForm> for SubmitEntryPayload {
    type Error = FormError;

    fn try_from(form: SubmitEntryForm) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(form.date.trim(), "%Y-%m-%d")
            .map_err(|_| FormError::InvalidDate)?;

        if form.type_id.len() != form.quantity.len()
            || form.extra_quantity.len() != form.extra_value.len()
        {
            return Err(FormError::Malformed);
        }

        let regular = form
            .type_id
            .iter()
            .zip(&form.quantity)
            .map(|(&type_id, quantity)| {
                let type_id =
                    DeliveryTypeId::new(type_id).map_err(|_| FormError::UnknownDeliveryType)?;
                Ok((type_id, parse_quantity(quantity)?))
            })
            .collect::<Result<Vec<_>, FormError>>()?;

        let extras = form
            .extra_quantity
            .iter()
            .zip(&form.extra_value)
            .map(|(quantity, value)| Ok((parse_quantity(quantity)?, parse_value(value)?)))
            .collect::<Result<Vec<_>, FormError>>()?;

        Ok(Self {
            date,
            regular,
            extras,
        })
    }
}

impl SubmitEntryPayload {
    /// Applies the submission rules against the hub's `types`.
    ///
    /// Regular items are priced with their type's canonical value; extra
    /// items keep their own value and must be priced above zero.
    pub fn into_domain(
        self,
        hub_id: HubId,
        deliverer_id: DelivererId,
        types: &[DeliveryType],
    ) -> Result<NewDeliveryEntry, FormError> {
        let regular: Vec<_> = self.regular.into_iter().filter(|(_, q)| *q > 0).collect();
        let extras: Vec<_> = self.extras.into_iter().filter(|(q, _)| *q > 0).collect();

        if regular.is_empty() && extras.is_empty() {
            return Err(FormError::NoDeliveries);
        }
        if extras.iter().any(|(_, value)| *value <= 0.0) {
            return Err(FormError::InvalidExtraValue);
        }

        let mut items = Vec::with_capacity(regular.len() + extras.len());
        for (type_id, quantity) in regular {
            let delivery_type = types
                .iter()
                .find(|t| t.id == type_id && t.hub_id == hub_id && !t.is_extra)
                .ok_or(FormError::UnknownDeliveryType)?;
            items.push(DeliveryItem::new(type_id, quantity, delivery_type.unit_value));
        }

        if !extras.is_empty() {
            let extra_type = find_extra_type(types)
                .filter(|t| t.hub_id == hub_id)
                .ok_or(FormError::MissingExtraType)?;
            for (quantity, value) in extras {
                let value = UnitValue::new(value).map_err(|_| FormError::InvalidExtraValue)?;
                items.push(DeliveryItem::new(extra_type.id, quantity, value));
            }
        }

        Ok(NewDeliveryEntry::new(hub_id, deliverer_id, self.date, items))
    }
}

/// Blank means zero.
fn parse_quantity(raw: &str) -> Result<u32, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse().map_err(|_| FormError::InvalidQuantity)
}

/// Accepts both `10.50` and `10,50`. Blank means zero.
fn parse_value(raw: &str) -> Result<f64, FormError> {
    let raw = raw.trim().replace(',', ".");
    if raw.is_empty() {
        return Ok(0.0);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(FormError::InvalidExtraValue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::DeliveryTypeName;

    fn hub() -> HubId {
        HubId::new(1).unwrap()
    }

    fn deliverer() -> DelivererId {
        DelivererId::new(1).unwrap()
    }

    fn delivery_type(id: i32, name: &str, value: f64, is_extra: bool) -> DeliveryType {
        DeliveryType {
            id: DeliveryTypeId::new(id).unwrap(),
            hub_id: hub(),
            name: DeliveryTypeName::new(name).unwrap(),
            unit_value: UnitValue::new(value).unwrap(),
            is_extra,
        }
    }

    fn types() -> Vec<DeliveryType> {
        vec![
            delivery_type(1, "Entrega Local", 3.7, false),
            delivery_type(2, "Entrega Padrão", 5.0, false),
            delivery_type(4, "Extra", 0.0, true),
        ]
    }

    fn submit(body: &str) -> Result<NewDeliveryEntry, FormError> {
        let form = SubmitEntryForm::from_bytes(body.as_bytes())?;
        SubmitEntryPayload::try_from(form)?.into_domain(hub(), deliverer(), &types())
    }

    #[test]
    fn repeated_fields_become_priced_items() {
        let entry = submit(
            "date=2024-01-26&type_id=1&quantity=5&type_id=2&quantity=0\
             &extra_quantity=1&extra_value=10%2C00",
        )
        .unwrap();

        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2024, 1, 26).unwrap());
        assert_eq!(entry.items.len(), 2);
        assert_eq!(entry.items[0].quantity, 5);
        assert_eq!(entry.items[0].value.get(), 3.7);
        assert_eq!(entry.items[1].type_id.get(), 4);
        assert_eq!(entry.items[1].value.get(), 10.0);
    }

    #[test]
    fn all_zero_quantities_are_rejected() {
        let result = submit("date=2024-02-01&type_id=1&quantity=0&type_id=2&quantity=");
        assert!(matches!(result, Err(FormError::NoDeliveries)));

        let result = submit("date=2024-02-01");
        assert!(matches!(result, Err(FormError::NoDeliveries)));
    }

    #[test]
    fn extra_without_positive_value_is_rejected() {
        let result = submit("date=2024-02-01&extra_quantity=2&extra_value=0");
        assert!(matches!(result, Err(FormError::InvalidExtraValue)));

        let result = submit("date=2024-02-01&extra_quantity=2&extra_value=-5");
        assert!(matches!(result, Err(FormError::InvalidExtraValue)));
    }

    #[test]
    fn unpriced_extra_row_with_zero_quantity_is_ignored() {
        let entry = submit("date=2024-02-01&type_id=1&quantity=1&extra_quantity=0&extra_value=")
            .unwrap();
        assert_eq!(entry.items.len(), 1);
    }

    #[test]
    fn foreign_or_unknown_types_are_rejected() {
        let result = submit("date=2024-02-01&type_id=99&quantity=1");
        assert!(matches!(result, Err(FormError::UnknownDeliveryType)));

        let result = submit("date=2024-02-01&type_id=4&quantity=1");
        assert!(matches!(result, Err(FormError::UnknownDeliveryType)));
    }

    #[test]
    fn malformed_quantities_and_dates_are_rejected() {
        assert!(matches!(
            submit("date=2024-02-01&type_id=1&quantity=-1"),
            Err(FormError::InvalidQuantity)
        ));
        assert!(matches!(
            submit("date=2024-02-01&type_id=1&quantity=abc"),
            Err(FormError::InvalidQuantity)
        ));
        assert!(matches!(
            submit("date=01/02/2024&type_id=1&quantity=1"),
            Err(FormError::InvalidDate)
        ));
    }

    #[test]
    fn extras_need_an_extra_type() {
        let form = SubmitEntryForm::from_bytes(b"date=2024-02-01&extra_quantity=1&extra_value=8")
            .unwrap();
        let regular_only = vec![delivery_type(1, "Entrega Local", 3.7, false)];

        let result =
            SubmitEntryPayload::try_from(form)
                .unwrap()
                .into_domain(hub(), deliverer(), &regular_only);

        assert!(matches!(result, Err(FormError::MissingExtraType)));
    }
}
