use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::client::{mask_tax_id, Client, ClientId, NpsCategory, ResponseType};
use crate::domain::region::ColorTier;
use crate::errors::DomainError;

pub const ROWS_PER_PAGE: usize = 8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    #[default]
    #[serde(rename = "nome")]
    Name,
    #[serde(rename = "nps_score")]
    NpsScore,
    #[serde(rename = "regiao")]
    Region,
    #[serde(rename = "tipo")]
    ResponseType,
}

impl FromStr for SortField {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "nome" => Ok(Self::Name),
            "nps_score" => Ok(Self::NpsScore),
            "regiao" => Ok(Self::Region),
            "tipo" => Ok(Self::ResponseType),
            _ => Err(DomainError::UnknownSortField(value.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableQuery {
    pub category: Option<NpsCategory>,
    pub search: Option<String>,
    pub sort: SortField,
    pub direction: SortDirection,
    /// Zero-based.
    pub page: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRow {
    pub id: ClientId,
    pub nome: String,
    pub cpf: String,
    pub nps_score: u8,
    pub categoria: NpsCategory,
    pub tipo: ResponseType,
    pub regiao: String,
    pub cor: ColorTier,
}

impl From<&Client> for ClientRow {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            nome: client.name.clone(),
            cpf: client.masked_tax_id(),
            nps_score: client.nps_score,
            categoria: client.category,
            tipo: client.response,
            regiao: client.region.clone(),
            cor: ColorTier::for_answer(client.nps_score),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientPage {
    pub rows: Vec<ClientRow>,
    pub page: usize,
    pub total_rows: usize,
    pub total_pages: usize,
}

pub fn query_clients(clients: &[Client], query: &TableQuery) -> ClientPage {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|needle| !needle.is_empty())
        .map(str::to_lowercase);

    let mut matching: Vec<&Client> = clients
        .iter()
        .filter(|client| query.category.map_or(true, |category| client.category == category))
        .filter(|client| needle.as_deref().map_or(true, |needle| matches_search(client, needle)))
        .collect();

    // sort_by is stable, so ties keep the derivation order.
    matching.sort_by(|left, right| {
        let ordering = compare(left, right, query.sort);
        match query.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    let total_rows = matching.len();
    let rows = matching
        .into_iter()
        .skip(query.page.saturating_mul(ROWS_PER_PAGE))
        .take(ROWS_PER_PAGE)
        .map(ClientRow::from)
        .collect();

    ClientPage {
        rows,
        page: query.page,
        total_rows,
        total_pages: total_rows.div_ceil(ROWS_PER_PAGE),
    }
}

fn matches_search(client: &Client, needle: &str) -> bool {
    client.name.to_lowercase().contains(needle)
        || client.tax_id.contains(needle)
        || mask_tax_id(&client.tax_id).contains(needle)
        || client.response.label().to_lowercase().contains(needle)
        || client.nps_score.to_string().contains(needle)
        || client.category.label().to_lowercase().contains(needle)
        || client.region.to_lowercase().contains(needle)
}

fn compare(left: &Client, right: &Client, field: SortField) -> Ordering {
    match field {
        SortField::Name => collate(&left.name, &right.name),
        SortField::NpsScore => left.nps_score.cmp(&right.nps_score),
        SortField::Region => collate(&left.region, &right.region),
        SortField::ResponseType => left.response.label().cmp(right.response.label()),
    }
}

/// Accent- and case-insensitive comparison, falling back to the raw text on ties.
fn collate(left: &str, right: &str) -> Ordering {
    fold(left).cmp(&fold(right)).then_with(|| left.cmp(right))
}

fn fold(value: &str) -> String {
    value
        .chars()
        .flat_map(char::to_lowercase)
        .map(|ch| match ch {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{query_clients, SortDirection, SortField, TableQuery, ROWS_PER_PAGE};
    use crate::domain::client::NpsCategory;
    use crate::domain::region::ColorTier;
    use crate::errors::DomainError;
    use crate::fixtures::seed_clients;

    #[test]
    fn first_page_holds_eight_rows_sorted_by_name() {
        let page = query_clients(&seed_clients(), &TableQuery::default());

        assert_eq!(page.total_rows, 20);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.rows.len(), ROWS_PER_PAGE);
        assert_eq!(page.rows[0].nome, "Amanda Torres");
        assert_eq!(page.rows[1].nome, "Ana Costa");
        assert_eq!(page.rows[0].cpf, "***.***.357-00");
    }

    #[test]
    fn last_page_and_out_of_range_pages() {
        let clients = seed_clients();
        let last = query_clients(&clients, &TableQuery { page: 2, ..TableQuery::default() });
        assert_eq!(last.rows.len(), 4);

        let beyond = query_clients(&clients, &TableQuery { page: 7, ..TableQuery::default() });
        assert!(beyond.rows.is_empty());
        assert_eq!(beyond.total_rows, 20);
    }

    #[test]
    fn category_filter_and_score_sort_descending() {
        let page = query_clients(
            &seed_clients(),
            &TableQuery {
                category: Some(NpsCategory::Detractor),
                sort: SortField::NpsScore,
                direction: SortDirection::Desc,
                ..TableQuery::default()
            },
        );

        let scores: Vec<u8> = page.rows.iter().map(|row| row.nps_score).collect();
        assert_eq!(scores, vec![6, 5, 4, 3, 2]);
        assert!(page.rows.iter().all(|row| row.cor == ColorTier::Red));
    }

    #[test]
    fn search_matches_region_category_and_masked_cpf() {
        let clients = seed_clients();
        let search = |text: &str| {
            query_clients(
                &clients,
                &TableQuery { search: Some(text.to_string()), ..TableQuery::default() },
            )
            .total_rows
        };

        assert_eq!(search("  curitiba "), 2);
        assert_eq!(search("DETRATOR"), 5);
        assert_eq!(search("***.***.963"), 1);
        assert_eq!(search("   "), 20);
    }

    #[test]
    fn sort_field_keys_parse() {
        assert_eq!("tipo".parse::<SortField>(), Ok(SortField::ResponseType));
        assert_eq!(
            "cpf".parse::<SortField>(),
            Err(DomainError::UnknownSortField("cpf".to_string()))
        );
    }
}
