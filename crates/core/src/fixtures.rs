use chrono::NaiveDate;
use tracing::warn;

use crate::domain::client::{Client, ClientId, NpsCategory, ResponseType, StateCode};
use crate::domain::product::{Product, ProductId};
use crate::domain::region::{ColorTier, RegionalAggregate};

use ResponseType::{Predicted as Calc, Responded as Resp};

struct SeedClient {
    id: u32,
    name: &'static str,
    tax_id: &'static str,
    phone: &'static str,
    nps_score: u8,
    response: ResponseType,
    region: &'static str,
    products: &'static [&'static str],
    registered_on: &'static str,
    address: &'static str,
}

/// Canonical survey sample behind every derived dashboard view.
#[rustfmt::skip]
const SEED_CLIENTS: &[SeedClient] = &[
    SeedClient { id: 1, name: "Maria Silva", tax_id: "123.456.789-00", phone: "(11) 98765-4321", nps_score: 9, response: Resp, region: "São Paulo - SP", products: &["Claro Móvel 50GB", "Internet 500MB"], registered_on: "2025-12-15", address: "Rua Augusta, 1200 - São Paulo, SP" },
    SeedClient { id: 2, name: "João Santos", tax_id: "987.654.321-00", phone: "(21) 97654-3210", nps_score: 4, response: Calc, region: "Rio de Janeiro - RJ", products: &["Claro Móvel 20GB"], registered_on: "2025-11-22", address: "Av. Atlântica, 500 - Rio de Janeiro, RJ" },
    SeedClient { id: 3, name: "Ana Costa", tax_id: "456.789.123-00", phone: "(11) 96543-2109", nps_score: 10, response: Resp, region: "São Paulo - SP", products: &["Claro Móvel 100GB", "Claro TV", "Internet 1GB"], registered_on: "2026-01-10", address: "Rua Oscar Freire, 88 - São Paulo, SP" },
    SeedClient { id: 4, name: "Pedro Oliveira", tax_id: "321.654.987-00", phone: "(61) 95432-1098", nps_score: 7, response: Calc, region: "Brasília - DF", products: &["Claro Fixo", "Internet 300MB"], registered_on: "2025-08-05", address: "SQS 308, Bloco A - Brasília, DF" },
    SeedClient { id: 5, name: "Carla Mendes", tax_id: "654.321.987-00", phone: "(31) 94321-0987", nps_score: 9, response: Resp, region: "Belo Horizonte - MG", products: &["Claro Móvel 80GB", "Internet 600MB"], registered_on: "2026-02-01", address: "Rua da Bahia, 1150 - Belo Horizonte, MG" },
    SeedClient { id: 6, name: "Lucas Ferreira", tax_id: "789.123.456-00", phone: "(51) 93210-9876", nps_score: 3, response: Calc, region: "Porto Alegre - RS", products: &["Claro Móvel 10GB"], registered_on: "2025-10-28", address: "Av. Ipiranga, 1200 - Porto Alegre, RS" },
    SeedClient { id: 7, name: "Juliana Almeida", tax_id: "147.258.369-00", phone: "(41) 92109-8765", nps_score: 10, response: Calc, region: "Curitiba - PR", products: &["Claro Móvel 50GB", "Claro TV", "Internet 1GB", "Claro Fixo"], registered_on: "2025-09-12", address: "Rua XV de Novembro, 500 - Curitiba, PR" },
    SeedClient { id: 8, name: "Rafael Lima", tax_id: "258.369.147-00", phone: "(71) 91098-7654", nps_score: 8, response: Resp, region: "Salvador - BA", products: &["Claro Móvel 30GB", "Internet 200MB"], registered_on: "2026-01-20", address: "Rua Chile, 200 - Salvador, BA" },
    SeedClient { id: 9, name: "Fernanda Rocha", tax_id: "369.147.258-00", phone: "(85) 90987-6543", nps_score: 9, response: Resp, region: "Fortaleza - CE", products: &["Claro Móvel 80GB", "Internet 500MB"], registered_on: "2025-12-30", address: "Av. Beira Mar, 3000 - Fortaleza, CE" },
    SeedClient { id: 10, name: "Bruno Cardoso", tax_id: "741.852.963-00", phone: "(81) 89876-5432", nps_score: 5, response: Calc, region: "Recife - PE", products: &["Claro Móvel 15GB"], registered_on: "2025-06-14", address: "Rua da Aurora, 800 - Recife, PE" },
    SeedClient { id: 11, name: "Patrícia Souza", tax_id: "852.963.741-00", phone: "(11) 88765-4321", nps_score: 7, response: Calc, region: "São Paulo - SP", products: &["Claro Móvel 30GB"], registered_on: "2025-07-08", address: "Av. Paulista, 1500 - São Paulo, SP" },
    SeedClient { id: 12, name: "Diego Martins", tax_id: "963.741.852-00", phone: "(21) 87654-3210", nps_score: 10, response: Resp, region: "Rio de Janeiro - RJ", products: &["Claro Móvel 100GB", "Claro TV", "Internet 1GB"], registered_on: "2025-11-01", address: "Rua Visconde de Pirajá, 400 - Rio de Janeiro, RJ" },
    SeedClient { id: 13, name: "Camila Ribeiro", tax_id: "159.357.486-00", phone: "(92) 86543-2109", nps_score: 2, response: Resp, region: "Manaus - AM", products: &["Claro Móvel 5GB"], registered_on: "2025-04-22", address: "Av. Eduardo Ribeiro, 600 - Manaus, AM" },
    SeedClient { id: 14, name: "Thiago Barbosa", tax_id: "357.486.159-00", phone: "(61) 85432-1098", nps_score: 9, response: Calc, region: "Brasília - DF", products: &["Claro Móvel 80GB", "Internet 500MB", "Claro Fixo"], registered_on: "2026-02-05", address: "SQN 204, Bloco C - Brasília, DF" },
    SeedClient { id: 15, name: "Amanda Torres", tax_id: "486.159.357-00", phone: "(31) 84321-0987", nps_score: 8, response: Resp, region: "Belo Horizonte - MG", products: &["Claro Móvel 50GB", "Internet 300MB"], registered_on: "2025-10-05", address: "Praça da Liberdade, 100 - Belo Horizonte, MG" },
    SeedClient { id: 16, name: "Roberto Nascimento", tax_id: "624.813.579-00", phone: "(71) 83210-9876", nps_score: 10, response: Calc, region: "Salvador - BA", products: &["Claro Móvel 100GB", "Claro TV"], registered_on: "2025-03-20", address: "Av. Tancredo Neves, 900 - Salvador, BA" },
    SeedClient { id: 17, name: "Isabela Gomes", tax_id: "813.579.624-00", phone: "(11) 82109-8765", nps_score: 6, response: Calc, region: "São Paulo - SP", products: &["Internet 200MB"], registered_on: "2025-12-10", address: "Rua da Consolação, 2200 - São Paulo, SP" },
    SeedClient { id: 18, name: "Marcelo Pereira", tax_id: "579.624.813-00", phone: "(41) 81098-7654", nps_score: 9, response: Resp, region: "Curitiba - PR", products: &["Claro Móvel 50GB", "Claro TV", "Internet 600MB"], registered_on: "2025-11-25", address: "Rua Comendador Araújo, 300 - Curitiba, PR" },
    SeedClient { id: 19, name: "Larissa Castro", tax_id: "246.135.789-00", phone: "(85) 80987-6543", nps_score: 7, response: Calc, region: "Fortaleza - CE", products: &["Claro Móvel 20GB", "Internet 100MB"], registered_on: "2025-09-18", address: "Rua Barão de Studart, 1500 - Fortaleza, CE" },
    SeedClient { id: 20, name: "Felipe Duarte", tax_id: "135.789.246-00", phone: "(51) 79876-5432", nps_score: 10, response: Resp, region: "Porto Alegre - RS", products: &["Claro Móvel 80GB", "Internet 1GB", "Claro TV", "Claro Fixo"], registered_on: "2026-01-08", address: "Rua dos Andradas, 1000 - Porto Alegre, RS" },
];

struct SeedRegion {
    city: &'static str,
    state: &'static str,
    lat: f64,
    lng: f64,
    nps_score: i32,
    client_count: u32,
    color: ColorTier,
}

#[rustfmt::skip]
const SEED_REGIONS: &[SeedRegion] = &[
    SeedRegion { city: "São Paulo", state: "SP", lat: -23.5505, lng: -46.6333, nps_score: 58, client_count: 25_000, color: ColorTier::Green },
    SeedRegion { city: "Rio de Janeiro", state: "RJ", lat: -22.9068, lng: -43.1729, nps_score: 45, client_count: 18_000, color: ColorTier::Yellow },
    SeedRegion { city: "Brasília", state: "DF", lat: -15.8267, lng: -47.9218, nps_score: 62, client_count: 8_000, color: ColorTier::Green },
    SeedRegion { city: "Belo Horizonte", state: "MG", lat: -19.9167, lng: -43.9345, nps_score: 52, client_count: 9_000, color: ColorTier::Green },
    SeedRegion { city: "Salvador", state: "BA", lat: -12.9714, lng: -38.5124, nps_score: 38, client_count: 7_000, color: ColorTier::Yellow },
    SeedRegion { city: "Fortaleza", state: "CE", lat: -3.7172, lng: -38.5247, nps_score: 55, client_count: 6_000, color: ColorTier::Green },
    SeedRegion { city: "Recife", state: "PE", lat: -8.0476, lng: -34.877, nps_score: 30, client_count: 5_000, color: ColorTier::Red },
    SeedRegion { city: "Porto Alegre", state: "RS", lat: -30.0346, lng: -51.2177, nps_score: 60, client_count: 5_500, color: ColorTier::Green },
    SeedRegion { city: "Curitiba", state: "PR", lat: -25.4284, lng: -49.2733, nps_score: 65, client_count: 4_000, color: ColorTier::Green },
    SeedRegion { city: "Manaus", state: "AM", lat: -3.119, lng: -60.0217, nps_score: 42, client_count: 2_500, color: ColorTier::Yellow },
];

const SEED_PRODUCTS: &[(&str, &str, &str)] = &[
    ("1", "Claro Móvel 5GB", "Plano Móvel"),
    ("2", "Claro Móvel 20GB", "Plano Móvel"),
    ("3", "Claro Móvel 50GB", "Plano Móvel"),
    ("4", "Claro Móvel 100GB", "Plano Móvel"),
    ("5", "Internet 200MB", "Banda Larga"),
    ("6", "Internet 500MB", "Banda Larga"),
    ("7", "Internet 1GB", "Banda Larga"),
    ("8", "Claro TV", "TV por Assinatura"),
    ("9", "Claro Fixo", "Telefonia Fixa"),
    ("10", "Claro Combo", "Combo"),
];

/// Precomputed survey figures per product; the series builders in `products` expand them.
pub(crate) struct SeedProductMetrics {
    pub product_id: &'static str,
    pub nps_score: f64,
    pub csat_score: f64,
    pub csat_previous: f64,
    pub ces_score: f64,
    pub response_time: &'static str,
    pub response_time_previous: &'static str,
    pub total_clients: u64,
    /// (percent, count) for promoters, neutrals, detractors.
    pub tiers: [(f64, u64); 3],
    pub csat_series: [f64; 6],
    pub nps_series: [f64; 6],
    pub response_hours_base: f64,
    pub total_responded: u64,
    pub total_predicted: u64,
}

#[rustfmt::skip]
pub(crate) const SEED_PRODUCT_METRICS: &[SeedProductMetrics] = &[
    SeedProductMetrics { product_id: "1", nps_score: 32.0, csat_score: 58.0, csat_previous: 55.0, ces_score: 45.2, response_time: "14:30", response_time_previous: "16:05", total_clients: 4_200, tiers: [(42.5, 1_785), (25.3, 1_063), (32.2, 1_352)], csat_series: [52.0, 54.0, 55.0, 56.0, 57.0, 58.0], nps_series: [28.0, 29.0, 30.0, 31.0, 31.0, 32.0], response_hours_base: 14.5, total_responded: 5_000, total_predicted: 85_000 },
    SeedProductMetrics { product_id: "2", nps_score: 45.0, csat_score: 65.0, csat_previous: 62.0, ces_score: 58.7, response_time: "11:20", response_time_previous: "12:45", total_clients: 8_500, tiers: [(55.0, 4_675), (22.0, 1_870), (23.0, 1_955)], csat_series: [60.0, 61.0, 62.0, 63.0, 64.0, 65.0], nps_series: [40.0, 41.0, 42.0, 43.0, 44.0, 45.0], response_hours_base: 11.3, total_responded: 6_200, total_predicted: 72_000 },
    SeedProductMetrics { product_id: "3", nps_score: 62.0, csat_score: 73.0, csat_previous: 70.0, ces_score: 75.9, response_time: "8:45", response_time_previous: "10:12", total_clients: 15_200, tiers: [(67.8, 10_306), (20.4, 3_101), (11.8, 1_794)], csat_series: [68.0, 69.0, 70.0, 71.0, 72.0, 73.0], nps_series: [57.0, 58.0, 59.0, 60.0, 61.0, 62.0], response_hours_base: 8.75, total_responded: 8_400, total_predicted: 95_000 },
    SeedProductMetrics { product_id: "4", nps_score: 71.0, csat_score: 80.0, csat_previous: 78.0, ces_score: 82.1, response_time: "6:10", response_time_previous: "7:30", total_clients: 12_000, tiers: [(76.2, 9_144), (15.5, 1_860), (8.3, 996)], csat_series: [75.0, 76.0, 77.0, 78.0, 79.0, 80.0], nps_series: [66.0, 67.0, 68.0, 69.0, 70.0, 71.0], response_hours_base: 6.2, total_responded: 7_500, total_predicted: 88_000 },
    SeedProductMetrics { product_id: "5", nps_score: 38.0, csat_score: 55.0, csat_previous: 52.0, ces_score: 42.3, response_time: "18:00", response_time_previous: "20:15", total_clients: 3_800, tiers: [(45.0, 1_710), (24.0, 912), (31.0, 1_178)], csat_series: [50.0, 51.0, 52.0, 53.0, 54.0, 55.0], nps_series: [33.0, 34.0, 35.0, 36.0, 37.0, 38.0], response_hours_base: 18.0, total_responded: 3_200, total_predicted: 62_000 },
    SeedProductMetrics { product_id: "6", nps_score: 55.0, csat_score: 68.0, csat_previous: 65.0, ces_score: 64.8, response_time: "10:30", response_time_previous: "11:50", total_clients: 9_200, tiers: [(60.5, 5_566), (21.0, 1_932), (18.5, 1_702)], csat_series: [63.0, 64.0, 65.0, 66.0, 67.0, 68.0], nps_series: [50.0, 51.0, 52.0, 53.0, 54.0, 55.0], response_hours_base: 10.5, total_responded: 5_800, total_predicted: 78_000 },
    SeedProductMetrics { product_id: "7", nps_score: 68.0, csat_score: 78.0, csat_previous: 75.0, ces_score: 78.4, response_time: "7:20", response_time_previous: "8:40", total_clients: 11_500, tiers: [(72.0, 8_280), (17.5, 2_013), (10.5, 1_208)], csat_series: [73.0, 74.0, 75.0, 76.0, 77.0, 78.0], nps_series: [63.0, 64.0, 65.0, 66.0, 67.0, 68.0], response_hours_base: 7.3, total_responded: 7_200, total_predicted: 92_000 },
    SeedProductMetrics { product_id: "8", nps_score: 50.0, csat_score: 64.0, csat_previous: 61.0, ces_score: 60.2, response_time: "12:00", response_time_previous: "13:25", total_clients: 7_800, tiers: [(58.0, 4_524), (22.5, 1_755), (19.5, 1_521)], csat_series: [59.0, 60.0, 61.0, 62.0, 63.0, 64.0], nps_series: [45.0, 46.0, 47.0, 48.0, 49.0, 50.0], response_hours_base: 12.0, total_responded: 4_800, total_predicted: 68_000 },
    SeedProductMetrics { product_id: "9", nps_score: 42.0, csat_score: 60.0, csat_previous: 57.0, ces_score: 52.6, response_time: "15:10", response_time_previous: "17:00", total_clients: 5_500, tiers: [(50.0, 2_750), (24.0, 1_320), (26.0, 1_430)], csat_series: [55.0, 56.0, 57.0, 58.0, 59.0, 60.0], nps_series: [37.0, 38.0, 39.0, 40.0, 41.0, 42.0], response_hours_base: 15.2, total_responded: 4_200, total_predicted: 71_000 },
    SeedProductMetrics { product_id: "10", nps_score: 74.0, csat_score: 82.0, csat_previous: 80.0, ces_score: 85.3, response_time: "5:45", response_time_previous: "6:50", total_clients: 6_200, tiers: [(78.5, 4_867), (14.0, 868), (7.5, 465)], csat_series: [77.0, 78.0, 79.0, 80.0, 81.0, 82.0], nps_series: [69.0, 70.0, 71.0, 72.0, 73.0, 74.0], response_hours_base: 5.75, total_responded: 4_000, total_predicted: 55_000 },
];

pub fn seed_clients() -> Vec<Client> {
    SEED_CLIENTS
        .iter()
        .filter_map(|seed| {
            let Ok(registered_on) = NaiveDate::parse_from_str(seed.registered_on, "%Y-%m-%d")
            else {
                warn!(
                    event_name = "dataset.seed.invalid_date",
                    client_id = seed.id,
                    value = seed.registered_on,
                    "skipping seed client with unparseable registration date"
                );
                return None;
            };
            Some(Client {
                id: ClientId(seed.id),
                name: seed.name.to_string(),
                tax_id: seed.tax_id.to_string(),
                phone: seed.phone.to_string(),
                nps_score: seed.nps_score,
                category: NpsCategory::from_score(seed.nps_score),
                response: seed.response,
                region: seed.region.to_string(),
                products: seed.products.iter().map(|name| name.to_string()).collect(),
                registered_on,
                address: Some(seed.address.to_string()),
            })
        })
        .collect()
}

pub fn seed_regions() -> Vec<RegionalAggregate> {
    SEED_REGIONS
        .iter()
        .filter_map(|seed| {
            let state = seed.state.parse::<StateCode>().ok()?;
            Some(RegionalAggregate {
                city: seed.city.to_string(),
                state,
                lat: seed.lat,
                lng: seed.lng,
                nps_score: seed.nps_score,
                client_count: seed.client_count,
                color: seed.color,
            })
        })
        .collect()
}

pub fn seed_products() -> Vec<Product> {
    SEED_PRODUCTS
        .iter()
        .map(|(id, name, category)| Product {
            id: ProductId::new(*id),
            name: name.to_string(),
            category: category.to_string(),
        })
        .collect()
}
