use crate::EntityId;

/// Years for which the GDP reference base is published.
pub const AVAILABLE_YEARS: std::ops::RangeInclusive<i32> = 2010..=2021;

/// A municipality with the name it is displayed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Municipality {
    pub id: EntityId,
    pub name: String,
}

/// Fixed set of municipalities a panel can be built for.
#[derive(Debug, Clone)]
pub struct Roster {
    municipalities: Vec<Municipality>,
}

impl Roster {
    pub fn new(municipalities: Vec<Municipality>) -> Self {
        Self { municipalities }
    }

    /// Five largest municipalities of Rio de Janeiro state (2021 population estimate).
    /// The numeric prefix keeps them in population order when sorted by name.
    pub fn rio_de_janeiro_top5() -> Self {
        let entries = [
            (3304557, "1_Rio de Janeiro"),
            (3304904, "2_São Gonçalo"),
            (3301702, "3_Duque de Caxias"),
            (3303500, "4_Nova Iguaçu"),
            (3301009, "5_Campos dos Goytacazes"),
        ];
        Self::new(
            entries
                .iter()
                .map(|&(id, name)| Municipality { id: EntityId(id), name: name.to_string() })
                .collect(),
        )
    }

    /// Display name, falling back to the numeric code for entities outside the roster.
    pub fn display_name(&self, id: EntityId) -> String {
        self.municipalities
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.municipalities.iter().map(|m| m.id).collect()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.municipalities.iter().any(|m| m.id == id)
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::rio_de_janeiro_top5()
    }
}
