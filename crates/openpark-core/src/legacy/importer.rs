//! Imports parks and scenarios written by the first game.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{debug, error, info, warn};

use super::image::{GameVersion, ParkImage, RideRecord, is_user_string_id};
use super::layout::{header, history, peep_spawn, research, ride};
use super::mapping::ObjectMappings;
use super::tables::{self, colour, modern_ride};
use super::target::{
    Climate, Finance, GameDate, ImportTarget, ImportedRide, MarketingCampaign, PeepSpawn,
    Research, ResearchItem, SavedView, SelectedObject, Station, TrackColour, WeatherState,
};
use super::tiles;
use crate::config::ImportSettings;
use crate::error::{Error, Result};
use crate::object::{ObjectEntry, ObjectManager, ObjectType};
use crate::scenario::{Objective, ScenarioCategory, ScenarioInfo, sources};

/// Park value stored when the value was never computed.
const PARK_VALUE_UNDEFINED: i32 = i32::MIN;

/// Objective type whose currency argument is a park value.
const OBJECTIVE_PARK_VALUE_BY: u8 = 2;

/// The one release of Added Attractions that stored the compact inverted
/// coaster under the inverted coaster's type.
const VERSION_COMPACT_INVERTED_QUIRK: u32 = 110_018;

/// Launch mode that skips the station, which was the only launch the
/// first game had.
const MODE_POWERED_LAUNCH: u8 = 35;

const MARKETING_CAMPAIGNS: usize = 6;
const DEFAULT_SCENERY_GROUP_COUNT: u8 = 6;

mod park_flags {
    pub const ANTI_CHEAT_DEPRECATED: u32 = 1 << 8;
    pub const NO_MONEY: u32 = 1 << 11;
    pub const ENTRY_LOCKED_AT_FREE: u32 = 1 << 13;
    pub const NO_MONEY_SCENARIO: u32 = 1 << 17;
    pub const UNLOCK_ALL_PRICES: u32 = 1 << 31;
}

/// Research priority bits of the modern game.
mod research_category {
    pub const TRANSPORT: u8 = 1 << 0;
    pub const GENTLE: u8 = 1 << 1;
    pub const ROLLERCOASTER: u8 = 1 << 2;
    pub const THRILL: u8 = 1 << 3;
    pub const WATER: u8 = 1 << 4;
    pub const SHOP: u8 = 1 << 5;
    pub const SCENERY_GROUP: u8 = 1 << 6;
}

struct LoadedPark {
    image: ParkImage,
    source_name: String,
    is_scenario: bool,
}

/// Reads one legacy park and converts it. Use a fresh importer per file.
pub struct LegacyImporter {
    settings: ImportSettings,
    park: Option<LoadedPark>,
    park_value_factor: Option<i64>,
}

impl Default for LegacyImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl LegacyImporter {
    pub fn new() -> Self {
        Self::with_settings(ImportSettings::default())
    }

    pub fn with_settings(settings: ImportSettings) -> Self {
        Self {
            settings,
            park: None,
            park_value_factor: None,
        }
    }

    /// Loads a `.sv4` saved game or `.sc4` scenario, chosen by extension.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "sv4" => self.load_saved_game(path),
            "sc4" => self.load_scenario(path),
            _ => Err(Error::UnsupportedExtension(ext)),
        }
    }

    pub fn load_saved_game(&mut self, path: &Path) -> Result<()> {
        let data = fs::read(path)?;
        self.load_from_bytes(&data, false, &source_name(path))
    }

    pub fn load_scenario(&mut self, path: &Path) -> Result<()> {
        let data = fs::read(path)?;
        self.load_from_bytes(&data, true, &source_name(path))
    }

    /// Decodes a park container. `source_name` names the park when the file
    /// carries no scenario name.
    pub fn load_from_bytes(&mut self, data: &[u8], is_scenario: bool, source_name: &str) -> Result<()> {
        let image = ParkImage::decode(data)?;
        debug!(
            "Loaded legacy {} {} ({:?})",
            if is_scenario { "scenario" } else { "saved game" },
            source_name,
            image.game_version()?
        );
        self.park = Some(LoadedPark {
            image,
            source_name: source_name.to_string(),
            is_scenario,
        });
        self.park_value_factor = None;
        Ok(())
    }

    fn loaded(&self) -> Result<&LoadedPark> {
        self.park
            .as_ref()
            .ok_or_else(|| Error::NotFound("no legacy park loaded".to_string()))
    }

    /// Describes a loaded scenario for the scenario list.
    pub fn get_details(&mut self) -> Result<ScenarioInfo> {
        let factor = self.park_value_factor()?;
        let image = &self.loaded()?.image;
        let desc = official_source(image)?;
        Ok(ScenarioInfo {
            category: desc.as_ref().map_or(ScenarioCategory::Other, |d| d.category),
            objective: read_objective(image, factor)?,
            name: match &desc {
                Some(d) => d.title.to_string(),
                None => image.scenario_name()?,
            },
            details: String::new(),
        })
    }

    /// Every object the park needs that `objects` does not know.
    pub fn missing_objects(&self, objects: &dyn ObjectManager) -> Result<Vec<ObjectEntry>> {
        let image = &self.loaded()?.image;
        let mappings = ObjectMappings::build(image, &image.tiles()?, objects)?;
        let missing: Vec<ObjectEntry> = mappings
            .required_objects()
            .into_iter()
            .filter(|entry| objects.find_object(&entry.name()).is_none())
            .collect();
        for entry in &missing {
            warn!("[{}] Object not found.", entry);
        }
        Ok(missing)
    }

    /// Converts the loaded park, loading every object it needs.
    pub fn import(&mut self, objects: &mut dyn ObjectManager) -> Result<ImportTarget> {
        let factor = self.park_value_factor()?;
        let fix_land_ownership = self.settings.fix_land_ownership;
        let park = self.loaded()?;
        let image = &park.image;

        let raw_version = image.u32(header::GAME_VERSION)?;
        let version = image.game_version()?;
        let mut target = ImportTarget::new(version, image.map_size()?);

        let raw_tiles = image.tiles()?;
        let mappings = ObjectMappings::build(image, &raw_tiles, &*objects)?;
        load_objects(&mappings, objects, &mut target)?;

        for record in image.rides()? {
            if let Some(ride) = import_ride(image, &record, &mappings, version, raw_version)? {
                target.rides.push(ride);
            }
        }
        target.peep_spawns = import_peep_spawns(image)?;
        target.finance = import_finance(image, factor)?;
        import_research(image, &mappings, &mut target)?;
        import_park(image, &mut target)?;
        target.date = import_date(image)?;
        target.climate = import_climate(image)?;
        import_scenario(image, &park.source_name, factor, &mut target)?;
        target.saved_view = SavedView {
            x: image.u16(header::VIEW_X)?,
            y: image.u16(header::VIEW_Y)?,
            zoom: image.u8(header::VIEW_ZOOM)?,
            rotation: image.u8(header::VIEW_ROTATION)?,
        };
        tiles::import_tiles(image, &raw_tiles, &mappings, &mut target)?;
        if fix_land_ownership {
            tiles::fix_land_ownership(target.scenario.slot_index, &mut target);
        }

        info!(
            "Imported {} {}: {} rides, {} objects",
            if park.is_scenario { "scenario" } else { "park" },
            park.source_name,
            target.rides.len(),
            target.objects.len()
        );
        Ok(target)
    }

    /// Ratio (times ten) between the modern estimate of the park's value and
    /// the value the file stores. Computed once per park.
    fn park_value_factor(&mut self) -> Result<i64> {
        if let Some(factor) = self.park_value_factor {
            return Ok(factor);
        }
        let image = &self.loaded()?.image;
        let park_value = i64::from(image.i32(header::PARK_VALUE)?);
        let factor = if park_value != 0 {
            estimate_park_value(image)? * 10 / park_value
        } else {
            100
        };
        self.park_value_factor = Some(factor);
        Ok(factor)
    }
}

fn source_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Imports the legacy park at `path`, logging and returning `None` on
/// failure.
pub fn load_legacy_park(path: &Path, objects: &mut dyn ObjectManager) -> Option<ImportTarget> {
    let mut importer = LegacyImporter::new();
    match importer.load(path).and_then(|()| importer.import(objects)) {
        Ok(target) => Some(target),
        Err(e) => {
            error!("Unable to import {}: {}", path.display(), e);
            None
        }
    }
}

/// Sum of the rated rides' values, scaled like the modern park value.
fn estimate_park_value(image: &ParkImage) -> Result<i64> {
    let mut total = 0i64;
    for record in image.rides()? {
        let value = record.u16(ride::VALUE)?;
        if value != ride::VALUE_UNDEFINED {
            total += i64::from(value) * 10;
        }
    }
    Ok(total)
}

fn correct_park_value(value: i32, factor: i64) -> i32 {
    if value == PARK_VALUE_UNDEFINED {
        return value;
    }
    let corrected = i64::from(value) * factor / 10;
    corrected.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn official_source(image: &ParkImage) -> Result<Option<sources::SourceDesc>> {
    let slot = image.u16(header::SCENARIO_SLOT_INDEX)?;
    Ok(u8::try_from(slot).ok().and_then(sources::try_get_by_id))
}

fn read_objective(image: &ParkImage, factor: i64) -> Result<Objective> {
    let kind = image.u8(header::OBJECTIVE_TYPE)?;
    let currency = image.i32(header::OBJECTIVE_CURRENCY)?;
    Ok(Objective {
        kind,
        arg1: image.u8(header::OBJECTIVE_YEARS)?,
        arg2: if kind == OBJECTIVE_PARK_VALUE_BY {
            correct_park_value(currency, factor)
        } else {
            currency
        },
        arg3: image.i16(header::OBJECTIVE_NUM_GUESTS)?,
    })
}

fn load_objects(
    mappings: &ObjectMappings,
    objects: &mut dyn ObjectManager,
    target: &mut ImportTarget,
) -> Result<()> {
    for entry in mappings.required_objects() {
        let handle = objects.load_object(&entry);
        if handle.is_none() {
            if entry.object_type() == Some(ObjectType::SceneryGroup) {
                warn!("Failed to load scenery group {}", entry.name());
            } else {
                error!("Failed to load {}", entry.name());
                return Err(Error::ObjectLoadFailed(entry.name()));
            }
        }
        target.objects.push(SelectedObject::new(&entry, handle));
    }
    Ok(())
}

fn import_ride(
    image: &ParkImage,
    record: &RideRecord<'_>,
    mappings: &ObjectMappings,
    version: GameVersion,
    raw_version: u32,
) -> Result<Option<ImportedRide>> {
    let legacy_type = record.ride_type()?;
    let Some(mut ride_type) = tables::ride_type(legacy_type) else {
        warn!("Discarding ride {} of unknown type {}", record.index, legacy_type);
        return Ok(None);
    };
    if raw_version == VERSION_COMPACT_INVERTED_QUIRK
        && legacy_type == tables::ride::INVERTED_ROLLER_COASTER
    {
        ride_type = modern_ride::COMPACT_INVERTED_COASTER;
    }

    let subtype = if tables::ride_type_uses_vehicles(legacy_type) {
        mappings.vehicle_entry(record.vehicle_type()?)
    } else {
        mappings.ride_entry(legacy_type)
    };
    let Some(subtype) = subtype else {
        warn!("Discarding ride with invalid ride entry");
        return Ok(None);
    };

    let mut lifecycle_flags = u32::from(record.u16(ride::LIFECYCLE_FLAGS)?);
    if version == GameVersion::Classic {
        lifecycle_flags &= !u32::from(
            ride::LIFECYCLE_MUSIC | ride::LIFECYCLE_INDESTRUCTIBLE | ride::LIFECYCLE_INDESTRUCTIBLE_TRACK,
        );
    }

    let heights: [u8; ride::STATIONS] = record.bytes(ride::STATION_HEIGHT)?;
    let lengths: [u8; ride::STATIONS] = record.bytes(ride::STATION_LENGTH)?;
    let lights: [u8; ride::STATIONS] = record.bytes(ride::STATION_LIGHT)?;
    let departs: [u8; ride::STATIONS] = record.bytes(ride::STATION_DEPART)?;
    let queues: [u8; ride::STATIONS] = record.bytes(ride::NUM_PEEPS_IN_QUEUE)?;
    let mut stations = Vec::with_capacity(ride::STATIONS);
    for i in 0..ride::STATIONS {
        stations.push(Station {
            start: record.xy(ride::STATION_STARTS + i * 2)?,
            height: heights[i] / 2,
            length: lengths[i],
            depart: lights[i],
            train_at_station: departs[i],
            entrance: record.xy(ride::ENTRANCE + i * 2)?,
            exit: record.xy(ride::EXIT + i * 2)?,
            last_peep_in_queue: record.u16(ride::LAST_PEEP_IN_QUEUE + i * 2)?,
            queue_length: queues[i],
        });
    }

    let mut depart_flags = record.u8(ride::DEPART_FLAGS)?;
    let music = if version == GameVersion::Classic {
        let plays_music = matches!(legacy_type, tables::ride::MERRY_GO_ROUND | tables::ride::DODGEMS);
        if plays_music && depart_flags & ride::DEPART_PLAY_MUSIC != 0 {
            depart_flags &= !ride::DEPART_PLAY_MUSIC;
            lifecycle_flags |= u32::from(ride::LIFECYCLE_MUSIC);
        }
        tables::default_music(ride_type)
    } else {
        record.u8(ride::MUSIC)?
    };

    let mode = match record.u8(ride::OPERATING_MODE)? {
        ride::MODE_POWERED_LAUNCH => MODE_POWERED_LAUNCH,
        mode => mode,
    };

    let (track_colours, entrance_style) = track_colours(record, legacy_type, ride_type, version)?;
    let bullwheel: [u8; 2] = record.bytes(ride::BULLWHEEL_Z)?;

    Ok(Some(ImportedRide {
        index: record.index as u8,
        ride_type,
        subtype,
        name: image.user_string(record.u16(ride::NAME)?)?,
        status: record.u8(ride::STATUS)?,
        lifecycle_flags,
        mode,
        depart_flags,
        overall_view: record.xy(ride::OVERALL_VIEW)?,
        stations,
        num_stations: record.u8(ride::NUM_STATIONS)?,
        num_trains: record.u8(ride::NUM_TRAINS)?,
        num_cars_per_train: record.u8(ride::NUM_CARS_PER_TRAIN)?,
        max_trains: record.u8(ride::MAX_TRAINS)?,
        min_waiting_time: record.u8(ride::MIN_WAITING_TIME)?,
        max_waiting_time: record.u8(ride::MAX_WAITING_TIME)?,
        operation_option: record.u8(ride::OPERATION_OPTION)?,
        num_circuits: 1,
        // Every lift hill ran at 5 mph.
        lift_hill_speed: 5,
        music,
        music_tune_id: 255,
        track_colours,
        vehicle_colours: vehicle_colours(record, ride_type, version)?,
        entrance_style,
        excitement: record.i16(ride::EXCITEMENT)?,
        intensity: record.i16(ride::INTENSITY)?,
        nausea: record.i16(ride::NAUSEA)?,
        value: record.u16(ride::VALUE)?,
        price: record.u16(ride::PRICE)?,
        max_speed: record.i32(ride::MAX_SPEED)?,
        average_speed: record.i32(ride::AVERAGE_SPEED)?,
        num_inversions: record.u8(ride::NUM_INVERSIONS)?,
        num_drops: record.u8(ride::NUM_DROPS)?,
        start_drop_height: record.u8(ride::START_DROP_HEIGHT)? / 2,
        highest_drop_height: record.u8(ride::HIGHEST_DROP_HEIGHT)? / 2,
        cur_test_track_z: record.u8(ride::CUR_TEST_TRACK_Z)? / 2,
        chairlift_bullwheel_z: [bullwheel[0] / 2, bullwheel[1] / 2],
        slide_peep_t_shirt_colour: tables::colour(record.u8(ride::SLIDE_PEEP_T_SHIRT_COLOUR)?),
        satisfaction: record.u8(ride::SATISFACTION)?,
        total_customers: record.u32(ride::TOTAL_CUSTOMERS)?,
        total_profit: record.i32(ride::TOTAL_PROFIT)?,
        popularity: record.u8(ride::POPULARITY)?,
        build_date: record.u8(ride::BUILD_DATE)?,
        upkeep_cost: record.u16(ride::UPKEEP_COST)?,
        reliability: record.u16(ride::RELIABILITY)?,
        downtime: record.u8(ride::DOWNTIME)?,
        inspection_interval: record.u8(ride::INSPECTION_INTERVAL)?,
        last_inspection: record.u8(ride::LAST_INSPECTION)?,
        income_per_hour: record.i32(ride::INCOME_PER_HOUR)?,
        profit: record.i32(ride::PROFIT)?,
    }))
}

/// Track colour schemes and entrance style. The base game had one scheme
/// and no entrance styles.
fn track_colours(
    record: &RideRecord<'_>,
    legacy_type: u8,
    ride_type: u8,
    version: GameVersion,
) -> Result<(Vec<TrackColour>, u8)> {
    let (mut schemes, entrance_style) = if version == GameVersion::Classic {
        let mut scheme = TrackColour {
            main: tables::colour(record.u8(ride::TRACK_PRIMARY_COLOUR)?),
            additional: tables::colour(record.u8(ride::TRACK_SECONDARY_COLOUR)?),
            supports: tables::colour(record.u8(ride::TRACK_SUPPORT_COLOUR)?),
        };
        match legacy_type {
            tables::ride::BALLOON_STALL => scheme.main = colour::LIGHT_BLUE,
            tables::ride::RIVER_RAPIDS => scheme.main = colour::WHITE,
            _ => {}
        }
        let mut schemes = vec![TrackColour::default(); ride::COLOUR_SCHEMES];
        schemes[0] = scheme;
        (schemes, 0)
    } else {
        let main: [u8; ride::COLOUR_SCHEMES] = record.bytes(ride::TRACK_COLOUR_MAIN)?;
        let additional: [u8; ride::COLOUR_SCHEMES] = record.bytes(ride::TRACK_COLOUR_ADDITIONAL)?;
        let supports: [u8; ride::COLOUR_SCHEMES] = record.bytes(ride::TRACK_COLOUR_SUPPORTS)?;
        let schemes = (0..ride::COLOUR_SCHEMES)
            .map(|i| TrackColour {
                main: tables::colour(main[i]),
                additional: tables::colour(additional[i]),
                supports: tables::colour(supports[i]),
            })
            .collect();
        (schemes, record.u8(ride::ENTRANCE_STYLE)?)
    };

    // Mazes were always hedges before Loopy Landscapes.
    if ride_type == modern_ride::MAZE {
        let raw = record.u8(ride::TRACK_COLOUR_SUPPORTS)?;
        schemes[0].supports = if version < GameVersion::LoopyLandscapes || raw > 3 {
            0
        } else {
            raw
        };
    }
    Ok((schemes, entrance_style))
}

fn vehicle_colours(record: &RideRecord<'_>, ride_type: u8, version: GameVersion) -> Result<Vec<[u8; 3]>> {
    let mut colours = vec![[0u8; 3]; ride::TRAINS];
    if version < GameVersion::LoopyLandscapes && ride_type == modern_ride::MERRY_GO_ROUND {
        colours[0] = [colour::YELLOW, colour::BRIGHT_RED, 0];
        return Ok(colours);
    }
    let copy = tables::colour_scheme_copy(record.vehicle_type()?);
    let raw: [u8; ride::TRAINS * 2] = record.bytes(ride::VEHICLE_COLOURS)?;
    for (i, colours) in colours.iter_mut().enumerate() {
        *colours = copy.apply(tables::colour(raw[i * 2]), tables::colour(raw[i * 2 + 1]));
    }
    Ok(colours)
}

fn import_peep_spawns(image: &ParkImage) -> Result<Vec<PeepSpawn>> {
    let mut spawns = Vec::new();
    for index in 0..peep_spawn::COUNT {
        let [x, y, z, direction] = image.peep_spawn(index)?;
        if x == peep_spawn::UNDEFINED {
            continue;
        }
        spawns.push(PeepSpawn {
            x,
            y,
            z: z * 16,
            direction: direction as u8,
        });
    }
    Ok(spawns)
}

fn import_finance(image: &ParkImage, factor: i64) -> Result<Finance> {
    let i32_history = |offset: usize| image.array(offset, history::FINANCE_LEN, 4, ParkImage::i32);
    let cash = image.i32(header::CASH)?;

    let mut expenditure = Vec::with_capacity(history::EXPENDITURE_MONTHS);
    for month in 0..history::EXPENDITURE_MONTHS {
        let offset = history::EXPENDITURE + month * history::EXPENDITURE_TYPES * 4;
        expenditure.push(image.array(offset, history::EXPENDITURE_TYPES, 4, ParkImage::i32)?);
    }

    let mut marketing = Vec::new();
    for campaign in 0..MARKETING_CAMPAIGNS {
        let weeks_left = image.u8(history::MARKETING_STATUS + campaign)?;
        if weeks_left != 0 {
            marketing.push(MarketingCampaign {
                campaign_type: campaign as u8,
                weeks_left,
                item: image.u8(history::MARKETING_ASSOC + campaign)?,
            });
        }
    }

    Ok(Finance {
        cash,
        initial_cash: cash,
        loan: image.i32(header::LOAN)?,
        max_loan: image.i32(header::MAX_LOAN)?,
        interest_rate: 1,
        entrance_fee: image.u16(header::ENTRANCE_FEE)?,
        land_price: image.u16(header::LAND_PRICE)?,
        construction_rights_price: image.u16(header::CONSTRUCTION_RIGHTS_PRICE)?,
        company_value: image.i32(header::COMPANY_VALUE)?,
        park_value: correct_park_value(image.i32(header::PARK_VALUE)?, factor),
        profit: image.i32(header::PROFIT)?,
        total_expenditure: image.i32(header::TOTAL_EXPENDITURE)?,
        completed_company_value: image.i32(header::COMPLETED_COMPANY_VALUE)?,
        num_admissions: image.u32(header::NUM_ADMISSIONS)?,
        admission_income: image.i32(header::ADMISSION_INCOME)?,
        cash_history: i32_history(history::CASH)?,
        weekly_profit_history: i32_history(history::WEEKLY_PROFIT)?,
        park_value_history: i32_history(history::PARK_VALUE)?
            .into_iter()
            .map(|v| correct_park_value(v, factor))
            .collect(),
        expenditure,
        marketing,
    })
}

fn import_research(image: &ParkImage, mappings: &ObjectMappings, target: &mut ImportTarget) -> Result<()> {
    let items = image.research_items()?;
    let research = &mut target.research;

    for group in 0..DEFAULT_SCENERY_GROUP_COUNT {
        research.insert(ResearchItem::Scenery { group }, true);
    }

    let mut ride_types_seen = HashSet::new();
    let mut entries_used = HashSet::new();

    let mut researched = true;
    for (i, item) in items.iter().enumerate() {
        match item.separator() {
            Some(research::END_AVAILABLE) => {
                researched = false;
                continue;
            }
            Some(research::END_RESEARCHABLE) => continue,
            Some(research::END) => break,
            _ => {}
        }

        match item.kind {
            research::TYPE_THEME => {
                if let Some(group) = mappings.scenery_theme(item.item).group() {
                    research.insert(ResearchItem::Scenery { group }, researched);
                }
            }
            research::TYPE_RIDE => {
                ride_types_seen.insert(item.item);
                let mut vehicles = 0;
                for (j, other) in items.iter().enumerate() {
                    if other.is_section_marker() {
                        continue;
                    }
                    if other.kind == research::TYPE_VEHICLE && other.related_ride == item.item {
                        // Later vehicles keep their own place in the list.
                        if j < i {
                            let entry = mappings.vehicle_entry(other.item);
                            insert_ride_entry(research, &mut entries_used, entry, researched);
                        }
                        vehicles += 1;
                    }
                }
                if vehicles == 0 {
                    let entry = mappings.ride_entry(item.item);
                    if entry.is_none() {
                        warn!("Research item for unmapped ride type {}", item.item);
                    }
                    insert_ride_entry(research, &mut entries_used, entry, researched);
                }
            }
            research::TYPE_VEHICLE => {
                if ride_types_seen.contains(&item.related_ride) {
                    let entry = mappings.vehicle_entry(item.item);
                    insert_ride_entry(research, &mut entries_used, entry, researched);
                }
            }
            _ => {}
        }
    }

    let priority = image.u8(header::RESEARCH_PRIORITY)?;
    let mut priorities = 0;
    if priority & research::CATEGORY_ROLLERCOASTERS != 0 {
        priorities |= research_category::ROLLERCOASTER;
    }
    if priority & research::CATEGORY_THRILL_RIDES != 0 {
        priorities |= research_category::THRILL | research_category::WATER;
    }
    if priority & research::CATEGORY_GENTLE_TRANSPORT_RIDES != 0 {
        priorities |= research_category::GENTLE | research_category::TRANSPORT;
    }
    if priority & research::CATEGORY_SHOPS != 0 {
        priorities |= research_category::SHOP;
    }
    if priority & research::CATEGORY_SCENERY_THEMING != 0 {
        priorities |= research_category::SCENERY_GROUP;
    }
    research.priorities = priorities;
    research.funding = image.u8(header::RESEARCH_LEVEL)?;
    research.progress = image.u16(header::RESEARCH_PROGRESS)?;
    research.progress_stage = image.u8(header::RESEARCH_PROGRESS_STAGE)?;
    research.expected_day = image.u8(header::NEXT_RESEARCH_EXPECTED_DAY)?;
    research.expected_month = image.u8(header::NEXT_RESEARCH_EXPECTED_MONTH)?;

    research.next_item = convert_research_item(
        mappings,
        image.u8(header::NEXT_RESEARCH_ITEM)?,
        image.u8(header::NEXT_RESEARCH_TYPE)?,
    );
    if research.next_item.is_none() {
        research.progress_stage = 0;
        research.progress = 0;
    }
    research.last_item = convert_research_item(
        mappings,
        image.u8(header::LAST_RESEARCH_ITEM)?,
        image.u8(header::LAST_RESEARCH_TYPE)?,
    );
    Ok(())
}

/// Each ride entry joins the research list once, at its first mention.
fn insert_ride_entry(research: &mut Research, used: &mut HashSet<u8>, entry: Option<u8>, researched: bool) {
    if let Some(entry) = entry {
        if used.insert(entry) {
            research.insert(ResearchItem::Ride { entry }, researched);
        }
    }
}

fn convert_research_item(mappings: &ObjectMappings, item: u8, kind: u8) -> Option<ResearchItem> {
    match kind {
        research::TYPE_RIDE => mappings.ride_entry(item).map(|entry| ResearchItem::Ride { entry }),
        research::TYPE_VEHICLE => mappings.vehicle_entry(item).map(|entry| ResearchItem::Ride { entry }),
        research::TYPE_THEME => mappings
            .scenery_theme(item)
            .group()
            .map(|group| ResearchItem::Scenery { group }),
        _ => None,
    }
}

fn import_park(image: &ParkImage, target: &mut ImportTarget) -> Result<()> {
    let park = &mut target.park;

    park.name = image.scenario_name()?;
    let name_id = image.u16(header::PARK_NAME_STRING)?;
    if is_user_string_id(name_id) {
        if let Some(name) = image.user_string(name_id)? {
            park.name = name;
        }
    }

    let raw_flags = image.u32(header::PARK_FLAGS)?;
    let mut flags = (park.flags | raw_flags) & !park_flags::ANTI_CHEAT_DEPRECATED;
    if raw_flags & park_flags::ENTRY_LOCKED_AT_FREE == 0 {
        flags |= park_flags::UNLOCK_ALL_PRICES;
    }
    if raw_flags & park_flags::NO_MONEY != 0 {
        flags |= park_flags::NO_MONEY_SCENARIO;
    }
    park.flags = flags;

    park.rating = image.u16(header::PARK_RATING)?;
    park.rating_history = image.bytes(history::PARK_RATING, history::SHORT_LEN)?.to_vec();
    park.guest_history = image.bytes(history::GUESTS, history::SHORT_LEN)?.to_vec();
    park.guest_initial_cash = image.u16(header::GUEST_INITIAL_CASH)?;
    park.guest_initial_hunger = image.u8(header::GUEST_INITIAL_HUNGER)?;
    park.guest_initial_thirst = image.u8(header::GUEST_INITIAL_THIRST)?;
    park.guest_initial_happiness = image.u8(header::GUEST_INITIAL_HAPPINESS)?;
    park.guest_generation_probability = image.u16(header::GUEST_GENERATION_PROBABILITY)?;
    park.handyman_colour = tables::colour(image.u8(header::HANDYMAN_COLOUR)?);
    park.mechanic_colour = tables::colour(image.u8(header::MECHANIC_COLOUR)?);
    park.security_colour = tables::colour(image.u8(header::SECURITY_COLOUR)?);
    park.size = image.u16(header::PARK_SIZE)?;
    park.total_ride_value_for_money = image.u16(header::TOTAL_RIDE_VALUE_FOR_MONEY)?;
    Ok(())
}

fn import_date(image: &ParkImage) -> Result<GameDate> {
    Ok(GameDate {
        month: image.u16(header::MONTH)?,
        day: image.u16(header::DAY)?,
        ticks: image.u32(header::TICKS)?,
        random: [image.u32(header::RANDOM_A)?, image.u32(header::RANDOM_B)?],
    })
}

fn import_climate(image: &ParkImage) -> Result<Climate> {
    Ok(Climate {
        climate: image.u8(header::CLIMATE)?,
        update_timer: image.u16(header::CLIMATE_TIMER)?,
        current: WeatherState {
            weather: image.u8(header::WEATHER)?,
            temperature: image.i8(header::TEMPERATURE)?,
            gloom: image.u8(header::WEATHER_GLOOM)?,
            rain: image.u8(header::RAIN)?,
        },
        next: WeatherState {
            weather: image.u8(header::TARGET_WEATHER)?,
            temperature: image.i8(header::TARGET_TEMPERATURE)?,
            gloom: image.u8(header::TARGET_WEATHER_GLOOM)?,
            rain: image.u8(header::TARGET_RAIN)?,
        },
    })
}

fn import_scenario(image: &ParkImage, source_name: &str, factor: i64, target: &mut ImportTarget) -> Result<()> {
    let scenario = &mut target.scenario;
    let desc = official_source(image)?;
    scenario.name = match &desc {
        Some(d) => d.title.to_string(),
        None => {
            let name = image.scenario_name()?;
            if name.is_empty() { source_name.to_string() } else { name }
        }
    };
    scenario.details = String::new();
    scenario.category = desc.map_or(ScenarioCategory::Other, |d| d.category);
    scenario.objective = read_objective(image, factor)?;
    scenario.slot_index = image.u16(header::SCENARIO_SLOT_INDEX)?;
    scenario.flags = image.u32(header::SCENARIO_FLAGS)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_park_value() {
        assert_eq!(correct_park_value(PARK_VALUE_UNDEFINED, 55), PARK_VALUE_UNDEFINED);
        assert_eq!(correct_park_value(1000, 100), 10_000);
        assert_eq!(correct_park_value(1000, 15), 1500);
        assert_eq!(correct_park_value(i32::MAX, 100), i32::MAX);
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let mut importer = LegacyImporter::new();
        assert!(matches!(
            importer.load(Path::new("park.sv6")),
            Err(Error::UnsupportedExtension(ext)) if ext == "sv6"
        ));
    }

    #[test]
    fn test_import_without_park_fails() {
        let mut importer = LegacyImporter::new();
        assert!(matches!(importer.get_details(), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_convert_research_item_unmapped() {
        let mappings = ObjectMappings::default();
        assert_eq!(convert_research_item(&mappings, 3, research::TYPE_RIDE), None);
        assert_eq!(convert_research_item(&mappings, 0, research::TYPE_SPECIAL), None);
    }
}
