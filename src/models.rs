use serde::{Deserialize, Serialize};

/// A single herb document
///
/// Optional fields that were never supplied are left out of the JSON
/// representation, so a record reads back with exactly the fields it was
/// written with. The snake_case aliases match the field names used by older
/// form clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HerbRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "days_to_germ", alias = "days_to_germinate")]
    pub days_to_germinate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "days_to_harvest")]
    pub days_to_harvest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "min_pot_diameter")]
    pub min_pot_diameter: Option<String>,
}

/// A partial herb document, as submitted to PUT and PATCH
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HerbPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "days_to_germ", alias = "days_to_germinate")]
    pub days_to_germinate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "days_to_harvest")]
    pub days_to_harvest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "min_pot_diameter")]
    pub min_pot_diameter: Option<String>,
}

impl HerbRecord {
    /// Build the document that fully replaces the record currently stored
    /// under `name`. Fields absent from the patch are cleared; an absent
    /// name keeps the current one.
    pub fn replacement(name: &str, patch: HerbPatch) -> Self {
        HerbRecord {
            name: patch.name.unwrap_or_else(|| name.to_string()),
            depth: patch.depth,
            spacing: patch.spacing,
            height: patch.height,
            days_to_germinate: patch.days_to_germinate,
            days_to_harvest: patch.days_to_harvest,
            min_pot_diameter: patch.min_pot_diameter,
        }
    }

    /// Merge the fields present in `patch` into this record
    pub fn merge(&mut self, patch: HerbPatch) {
        let HerbPatch {
            name,
            depth,
            spacing,
            height,
            days_to_germinate,
            days_to_harvest,
            min_pot_diameter,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if depth.is_some() {
            self.depth = depth;
        }
        if spacing.is_some() {
            self.spacing = spacing;
        }
        if height.is_some() {
            self.height = height;
        }
        if days_to_germinate.is_some() {
            self.days_to_germinate = days_to_germinate;
        }
        if days_to_harvest.is_some() {
            self.days_to_harvest = days_to_harvest;
        }
        if min_pot_diameter.is_some() {
            self.min_pot_diameter = min_pot_diameter;
        }
    }
}

/// Response type for the health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for an unhealthy store
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

#[cfg(test)]
pub(crate) fn basil() -> HerbRecord {
    HerbRecord {
        name: "Basil".to_string(),
        depth: Some("0.25in".to_string()),
        spacing: Some("10in".to_string()),
        height: Some("18in".to_string()),
        days_to_germinate: Some("5-10".to_string()),
        days_to_harvest: Some("60-90".to_string()),
        min_pot_diameter: Some("6in".to_string()),
    }
}
