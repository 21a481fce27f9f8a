use crate::domain::client::{Client, StateCode};
use crate::domain::product::{Product, ProductId};
use crate::domain::region::RegionalAggregate;
use crate::fixtures;

/// Static, read-only inputs of every derivation pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub clients: Vec<Client>,
    pub regions: Vec<RegionalAggregate>,
    pub products: Vec<Product>,
}

impl Dataset {
    pub fn new(
        clients: Vec<Client>,
        regions: Vec<RegionalAggregate>,
        products: Vec<Product>,
    ) -> Self {
        Self { clients, regions, products }
    }

    pub fn seed() -> Self {
        Self::new(fixtures::seed_clients(), fixtures::seed_regions(), fixtures::seed_products())
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    pub fn region_by_city(&self, city: &str) -> Option<&RegionalAggregate> {
        self.regions.iter().find(|region| region.city == city)
    }

    /// First regional record for a state, in table order.
    pub fn region_by_state(&self, state: &StateCode) -> Option<&RegionalAggregate> {
        self.regions.iter().find(|region| &region.state == state)
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::seed()
    }
}

#[cfg(test)]
mod tests {
    use super::Dataset;
    use crate::domain::product::ProductId;

    #[test]
    fn lookups_resolve_seed_records() {
        let dataset = Dataset::seed();

        let product = dataset.product(&ProductId::new("8")).expect("product 8");
        assert_eq!(product.name, "Claro TV");
        assert!(dataset.product(&ProductId::new("99")).is_none());

        let region = dataset.region_by_city("Recife").expect("recife");
        assert_eq!(region.state, "PE");

        let state = "rs".parse().expect("valid UF");
        assert_eq!(dataset.region_by_state(&state).map(|r| r.city.as_str()), Some("Porto Alegre"));
    }
}
