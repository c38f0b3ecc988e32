//! Substring filters used by customer and delivery log search.
//!
//! Both run in O(n) over records already loaded by the caller; a single
//! shop's collections are small enough that no index is involved.

use crate::model::{Customer, DeliveryLog};
use std::collections::HashMap;

/// Keeps customers whose `id`, `name` or `location` contains `query`.
pub fn filter_customers(customers: Vec<Customer>, query: &str) -> Vec<Customer> {
    let needle = query.to_lowercase();
    customers
        .into_iter()
        .filter(|customer| customer.matches_lowercase(&needle))
        .collect()
}

/// Keeps logs whose owning customer's name, dress type or recipient name
/// contains `query`.
///
/// `customer_names` maps customer id to name; logs whose customer is gone
/// are matched on their remaining fields only.
pub fn filter_delivery_logs(
    logs: Vec<DeliveryLog>,
    customer_names: &HashMap<&str, &str>,
    query: &str,
) -> Vec<DeliveryLog> {
    let needle = query.to_lowercase();
    logs.into_iter()
        .filter(|log| {
            let customer_name = customer_names
                .get(log.customer_id.as_str())
                .copied()
                .unwrap_or_default();
            let haystack = format!(
                "{customer_name} {} {}",
                log.dress_type.label(),
                log.recipient_name.as_deref().unwrap_or_default()
            );
            haystack.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{filter_customers, filter_delivery_logs};
    use crate::model::{Customer, DeliveryLog, DeliveryMode, DeliveryStatus, DressType};
    use std::collections::HashMap;

    fn customer(id: &str, name: &str, location: &str) -> Customer {
        Customer {
            id: id.to_string(),
            name: name.to_string(),
            location: location.to_string(),
            phone: None,
            email: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn log(id: &str, customer_id: &str, dress_type: DressType) -> DeliveryLog {
        DeliveryLog {
            id: id.to_string(),
            customer_id: customer_id.to_string(),
            dress_type,
            quantity: 1,
            delivery_mode: DeliveryMode::Customer,
            recipient_name: None,
            status: DeliveryStatus::Taken,
            taken_date: 0,
            delivery_date: None,
            notes: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn customer_filter_is_case_insensitive_and_keeps_order() {
        let customers = vec![
            customer("CUS-2", "Baraka", "Kisumu"),
            customer("CUS-1", "Asha", "Nairobi"),
            customer("CUS-3", "Zawadi", "nairobi west"),
        ];

        let ids: Vec<_> = filter_customers(customers, "NAIROBI")
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["CUS-1", "CUS-3"]);
    }

    #[test]
    fn empty_query_keeps_everything() {
        let customers = vec![customer("CUS-1", "Asha", "Nairobi")];
        assert_eq!(filter_customers(customers, "").len(), 1);
    }

    #[test]
    fn delivery_filter_matches_customer_name_dress_and_recipient() {
        let mut handed_over = log("DEL-2", "CUS-2", DressType::Dress7);
        handed_over.delivery_mode = DeliveryMode::Other;
        handed_over.recipient_name = Some("Neema".to_string());
        let logs = vec![
            log("DEL-1", "CUS-1", DressType::Dress1),
            handed_over,
            log("DEL-3", "CUS-gone", DressType::Dress3),
        ];
        let names = HashMap::from([("CUS-1", "Asha"), ("CUS-2", "Baraka")]);

        let by_name = filter_delivery_logs(logs.clone(), &names, "asha");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "DEL-1");

        let by_recipient = filter_delivery_logs(logs.clone(), &names, "neema");
        assert_eq!(by_recipient[0].id, "DEL-2");

        let by_dress = filter_delivery_logs(logs, &names, "dress 3");
        assert_eq!(by_dress.len(), 1);
        assert_eq!(by_dress[0].id, "DEL-3");
    }
}
