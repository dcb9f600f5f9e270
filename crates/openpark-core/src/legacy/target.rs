//! The park an import produces, in modern terms.
//!
//! Heights are in modern units, colours are modern colour codes and every
//! object reference is an index into the entry list of its type.

use std::collections::BTreeMap;

use serde::Serialize;

use super::image::GameVersion;
use crate::object::{ObjectEntry, ObjectHandle};
use crate::scenario::{Objective, ScenarioCategory};

/// Park flag: show real names on guests.
pub const PARK_FLAG_SHOW_REAL_GUEST_NAMES: u32 = 1 << 15;

#[derive(Debug, Clone, Serialize)]
pub struct ImportTarget {
    #[serde(serialize_with = "serialize_version")]
    pub game_version: GameVersion,
    pub map_size: u16,
    pub objects: Vec<SelectedObject>,
    pub tiles: Vec<Tile>,
    pub rides: Vec<ImportedRide>,
    pub park_entrances: Vec<ParkEntrance>,
    pub banners: BTreeMap<u8, Banner>,
    pub peep_spawns: Vec<PeepSpawn>,
    pub park: Park,
    pub finance: Finance,
    pub research: Research,
    pub date: GameDate,
    pub climate: Climate,
    pub scenario: ScenarioDetails,
    pub saved_view: SavedView,
}

fn serialize_version<S: serde::Serializer>(version: &GameVersion, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(match version {
        GameVersion::Classic => "classic",
        GameVersion::AddedAttractions => "added_attractions",
        GameVersion::LoopyLandscapes => "loopy_landscapes",
    })
}

impl ImportTarget {
    pub fn new(game_version: GameVersion, map_size: u16) -> Self {
        Self {
            game_version,
            map_size,
            objects: Vec::new(),
            tiles: Vec::new(),
            rides: Vec::new(),
            park_entrances: Vec::new(),
            banners: BTreeMap::new(),
            peep_spawns: Vec::new(),
            park: Park {
                flags: PARK_FLAG_SHOW_REAL_GUEST_NAMES,
                ..Park::default()
            },
            finance: Finance::default(),
            research: Research::default(),
            date: GameDate::default(),
            climate: Climate::default(),
            scenario: ScenarioDetails::default(),
            saved_view: SavedView::default(),
        }
    }

    pub fn tile(&self, x: u16, y: u16) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.x == x && t.y == y)
    }

    pub fn tile_mut(&mut self, x: u16, y: u16) -> Option<&mut Tile> {
        self.tiles.iter_mut().find(|t| t.x == x && t.y == y)
    }

    /// Names of the selected objects of one type, in entry order.
    pub fn object_names(&self, object_type: &str) -> Vec<&str> {
        self.objects
            .iter()
            .filter(|o| o.object_type == object_type)
            .map(|o| o.name.as_str())
            .collect()
    }
}

/// One object the park was linked against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedObject {
    pub object_type: &'static str,
    pub name: String,
    /// `None` for a scenery group that failed to load.
    pub handle: Option<u32>,
}

impl SelectedObject {
    pub fn new(entry: &ObjectEntry, handle: Option<ObjectHandle>) -> Self {
        Self {
            object_type: entry.object_type().map(<&str>::from).unwrap_or("Unknown"),
            name: entry.name(),
            handle: handle.map(|h| h.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub x: u16,
    pub y: u16,
    pub elements: Vec<TileElement>,
}

impl Tile {
    pub fn surface_mut(&mut self) -> Option<&mut Surface> {
        self.elements.iter_mut().find_map(|e| match &mut e.kind {
            ElementKind::Surface(surface) => Some(surface),
            _ => None,
        })
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.elements.iter().find_map(|e| match &e.kind {
            ElementKind::Surface(surface) => Some(surface),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileElement {
    pub base_height: u8,
    pub clearance_height: u8,
    pub direction: u8,
    pub ghost: bool,
    pub kind: ElementKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKind {
    Surface(Surface),
    Path(Path),
    Track(Track),
    SmallScenery(Scenery),
    Entrance(Entrance),
    Wall(Wall),
    LargeScenery(LargeScenery),
    Banner(BannerElement),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Surface {
    pub terrain: u8,
    pub edge: u8,
    pub slope: u8,
    pub water_height: u8,
    pub grass_length: u8,
    pub ownership: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Path {
    pub entry: u8,
    pub queue: bool,
    pub sloped: bool,
    pub slope_direction: u8,
    pub edges: u8,
    /// Path addition entry plus one; zero for none.
    pub addition: u8,
    pub addition_broken: bool,
    pub ride_index: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    pub track_type: u8,
    pub sequence: u8,
    pub colour_scheme: u8,
    pub ride_index: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scenery {
    pub entry: u8,
    pub age: u8,
    pub primary_colour: u8,
    pub secondary_colour: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LargeScenery {
    pub entry: u8,
    pub sequence: u8,
    pub primary_colour: u8,
    pub secondary_colour: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entrance {
    pub entrance_type: u8,
    pub index: u8,
    /// Path surface under a park entrance.
    pub path_entry: Option<u8>,
    pub ride_index: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Wall {
    pub entry: u8,
    pub colours: [u8; 3],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BannerElement {
    pub index: u8,
    pub position: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParkEntrance {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub direction: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub banner_type: u8,
    pub flags: u8,
    pub colour: u8,
    pub text_colour: u8,
    pub text: Option<String>,
    pub x: u8,
    pub y: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeepSpawn {
    pub x: u16,
    pub y: u16,
    pub z: u16,
    pub direction: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Station {
    pub start: Option<(u8, u8)>,
    pub height: u8,
    pub length: u8,
    pub depart: u8,
    pub train_at_station: u8,
    pub entrance: Option<(u8, u8)>,
    pub exit: Option<(u8, u8)>,
    pub last_peep_in_queue: u16,
    pub queue_length: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrackColour {
    pub main: u8,
    pub additional: u8,
    pub supports: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportedRide {
    pub index: u8,
    pub ride_type: u8,
    /// Ride object entry.
    pub subtype: u8,
    pub name: Option<String>,
    pub status: u8,
    pub lifecycle_flags: u32,
    pub mode: u8,
    pub depart_flags: u8,
    pub overall_view: Option<(u8, u8)>,
    pub stations: Vec<Station>,
    pub num_stations: u8,
    pub num_trains: u8,
    pub num_cars_per_train: u8,
    pub max_trains: u8,
    pub min_waiting_time: u8,
    pub max_waiting_time: u8,
    pub operation_option: u8,
    pub num_circuits: u8,
    pub lift_hill_speed: u8,
    pub music: u8,
    pub music_tune_id: u8,
    pub track_colours: Vec<TrackColour>,
    pub vehicle_colours: Vec<[u8; 3]>,
    pub entrance_style: u8,
    pub excitement: i16,
    pub intensity: i16,
    pub nausea: i16,
    pub value: u16,
    pub price: u16,
    pub max_speed: i32,
    pub average_speed: i32,
    pub num_inversions: u8,
    pub num_drops: u8,
    pub start_drop_height: u8,
    pub highest_drop_height: u8,
    pub cur_test_track_z: u8,
    pub chairlift_bullwheel_z: [u8; 2],
    pub slide_peep_t_shirt_colour: u8,
    pub satisfaction: u8,
    pub total_customers: u32,
    pub total_profit: i32,
    pub popularity: u8,
    pub build_date: u8,
    pub upkeep_cost: u16,
    pub reliability: u16,
    pub downtime: u8,
    pub inspection_interval: u8,
    pub last_inspection: u8,
    pub income_per_hour: i32,
    pub profit: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarketingCampaign {
    pub campaign_type: u8,
    pub weeks_left: u8,
    pub item: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Finance {
    pub cash: i32,
    pub initial_cash: i32,
    pub loan: i32,
    pub max_loan: i32,
    pub interest_rate: u8,
    pub entrance_fee: u16,
    pub land_price: u16,
    pub construction_rights_price: u16,
    pub company_value: i32,
    pub park_value: i32,
    pub profit: i32,
    pub total_expenditure: i32,
    pub completed_company_value: i32,
    pub num_admissions: u32,
    pub admission_income: i32,
    pub cash_history: Vec<i32>,
    pub weekly_profit_history: Vec<i32>,
    pub park_value_history: Vec<i32>,
    /// Sixteen months of per-category spending.
    pub expenditure: Vec<Vec<i32>>,
    pub marketing: Vec<MarketingCampaign>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResearchItem {
    Ride { entry: u8 },
    Scenery { group: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResearchEntry {
    pub item: ResearchItem,
    pub researched: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Research {
    pub items: Vec<ResearchEntry>,
    pub priorities: u8,
    pub funding: u8,
    pub progress: u16,
    pub progress_stage: u8,
    pub expected_day: u8,
    pub expected_month: u8,
    pub next_item: Option<ResearchItem>,
    pub last_item: Option<ResearchItem>,
}

impl Research {
    /// Adds an item unless it is already listed.
    pub fn insert(&mut self, item: ResearchItem, researched: bool) {
        if !self.contains(item) {
            self.items.push(ResearchEntry { item, researched });
        }
    }

    pub fn contains(&self, item: ResearchItem) -> bool {
        self.items.iter().any(|e| e.item == item)
    }

    pub fn is_researched(&self, item: ResearchItem) -> bool {
        self.items.iter().any(|e| e.item == item && e.researched)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Park {
    pub name: String,
    pub flags: u32,
    pub rating: u16,
    pub rating_history: Vec<u8>,
    pub guest_history: Vec<u8>,
    pub guest_initial_cash: u16,
    pub guest_initial_hunger: u8,
    pub guest_initial_thirst: u8,
    pub guest_initial_happiness: u8,
    pub guest_generation_probability: u16,
    pub handyman_colour: u8,
    pub mechanic_colour: u8,
    pub security_colour: u8,
    pub size: u16,
    pub total_ride_value_for_money: u16,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GameDate {
    pub month: u16,
    pub day: u16,
    pub ticks: u32,
    pub random: [u32; 2],
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WeatherState {
    pub weather: u8,
    pub temperature: i8,
    pub gloom: u8,
    pub rain: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Climate {
    pub climate: u8,
    pub update_timer: u16,
    pub current: WeatherState,
    pub next: WeatherState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioDetails {
    pub name: String,
    pub details: String,
    pub category: ScenarioCategory,
    pub objective: Objective,
    pub slot_index: u16,
    pub flags: u32,
}

impl Default for ScenarioDetails {
    fn default() -> Self {
        Self {
            name: String::new(),
            details: String::new(),
            category: ScenarioCategory::Other,
            objective: Objective::default(),
            slot_index: 0,
            flags: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SavedView {
    pub x: u16,
    pub y: u16,
    pub zoom: u8,
    pub rotation: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_target_defaults() {
        let target = ImportTarget::new(GameVersion::Classic, 128);
        assert_eq!(target.park.flags, PARK_FLAG_SHOW_REAL_GUEST_NAMES);
        assert_eq!(target.scenario.category, ScenarioCategory::Other);
        assert!(target.tiles.is_empty());
    }

    #[test]
    fn test_research_insert_dedupes() {
        let mut research = Research::default();
        let item = ResearchItem::Scenery { group: 2 };
        research.insert(item, true);
        research.insert(item, false);
        assert_eq!(research.items.len(), 1);
        assert!(research.is_researched(item));
        assert!(!research.contains(ResearchItem::Ride { entry: 0 }));
    }
}
