//! Works out which objects a legacy park needs.
//!
//! Legacy parks refer to rides and scenery by fixed codes. Every code found
//! in the research list, on the map or in a ride record gets an entry in the
//! list of its object type, and the code is mapped to that entry's index.

use tracing::warn;

use super::entries::{EntryList, EntryMap, ThemeSlot};
use super::image::{GameVersion, ParkImage, RawTile, ResearchRecord};
use super::layout::{header, research, tile};
use super::tables;
use crate::error::Result;
use crate::object::{ObjectEntry, ObjectManager, ObjectType};

const WATER_CYAN: u8 = 0;

#[derive(Debug, Clone)]
pub struct ObjectMappings {
    pub rides: EntryList,
    pub small_scenery: EntryList,
    pub large_scenery: EntryList,
    pub walls: EntryList,
    pub paths: EntryList,
    pub path_additions: EntryList,
    pub scenery_groups: EntryList,
    pub water: EntryList,

    ride_types: EntryMap,
    vehicle_types: EntryMap,
    small_scenery_types: EntryMap,
    large_scenery_types: EntryMap,
    wall_types: EntryMap,
    path_types: EntryMap,
    path_addition_types: EntryMap,
    scenery_themes: Vec<ThemeSlot>,
}

impl Default for ObjectMappings {
    fn default() -> Self {
        Self {
            rides: EntryList::new(),
            small_scenery: EntryList::new(),
            large_scenery: EntryList::new(),
            walls: EntryList::new(),
            paths: EntryList::new(),
            path_additions: EntryList::new(),
            scenery_groups: EntryList::new(),
            water: EntryList::new(),
            ride_types: EntryMap::new(tables::ride::COUNT),
            vehicle_types: EntryMap::new(tables::VEHICLE_TYPE_COUNT),
            small_scenery_types: EntryMap::new(256),
            large_scenery_types: EntryMap::new(1024),
            wall_types: EntryMap::new(256),
            path_types: EntryMap::new(24),
            path_addition_types: EntryMap::new(16),
            scenery_themes: vec![ThemeSlot::Unmapped; 24],
        }
    }
}

impl ObjectMappings {
    /// Scans a park and maps everything it uses. Scenery theme contents are
    /// resolved through `objects` to learn each object's type.
    pub fn build(image: &ParkImage, tiles: &[RawTile], objects: &dyn ObjectManager) -> Result<Self> {
        let mut mappings = Self::default();
        mappings.add_defaults();
        mappings.add_from_research(&image.research_items()?);
        mappings.add_from_map(tiles);
        for ride in image.rides()? {
            let ride_type = ride.ride_type()?;
            if tables::ride_type_uses_vehicles(ride_type) {
                mappings.add_vehicle_type(ride_type, ride.vehicle_type()?);
            } else {
                mappings.add_ride_type(ride_type);
            }
        }
        mappings.add_from_scenery_themes(objects);

        let water = if image.game_version()? < GameVersion::LoopyLandscapes {
            WATER_CYAN
        } else {
            image.u8(header::WATER_COLOUR)?
        };
        match tables::water_object(water) {
            Some(name) => {
                mappings.water.get_or_add(name);
            }
            None => warn!("Unknown water colour {}", water),
        }
        Ok(mappings)
    }

    pub(crate) fn add_defaults(&mut self) {
        self.scenery_groups.add_range(&tables::DEFAULT_SCENERY_GROUPS);
        self.paths.add_range(&tables::DEFAULT_PATHS);
    }

    fn add_from_research(&mut self, items: &[ResearchRecord]) {
        for item in items {
            if item.is_end() {
                break;
            }
            if item.is_section_marker() {
                continue;
            }
            match item.kind {
                research::TYPE_THEME => self.add_scenery_theme(item.item),
                research::TYPE_RIDE => {
                    let ride_type = item.item;
                    let mut vehicles = 0;
                    for other in items {
                        if other.is_end() {
                            break;
                        }
                        if other.is_section_marker() {
                            continue;
                        }
                        if other.kind == research::TYPE_VEHICLE && other.related_ride == ride_type {
                            self.add_vehicle_type(ride_type, other.item);
                            vehicles += 1;
                        }
                    }
                    if vehicles == 0 {
                        self.add_ride_type(ride_type);
                    }
                }
                _ => {}
            }
        }
    }

    fn add_from_map(&mut self, tiles: &[RawTile]) {
        for element in tiles.iter().flat_map(|t| &t.elements) {
            match element.kind() {
                tile::PATH => {
                    self.add_path(element.path_type());
                    self.add_path_addition(element.path_addition());
                }
                tile::SMALL_SCENERY => self.add_small_scenery(element.small_scenery_type()),
                tile::LARGE_SCENERY => self.add_large_scenery(element.large_scenery_type()),
                tile::WALL => {
                    for edge in 0..4 {
                        if let Some(wall_type) = element.wall_type(edge) {
                            self.add_wall(wall_type);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    /// Adds every object of each used theme, plus the general theme, while
    /// the list of that object's type has room.
    fn add_from_scenery_themes(&mut self, objects: &dyn ObjectManager) {
        for theme in 0..tables::scenery_theme_count() {
            if theme != 0 && self.scenery_themes[theme] == ThemeSlot::Unmapped {
                continue;
            }
            for name in tables::scenery_theme_objects(theme as u8) {
                let Some(object_type) = objects.find_object(name).and_then(|e| e.object_type()) else {
                    continue;
                };
                let Some(list) = self.list_mut(object_type) else {
                    continue;
                };
                if list.len() < object_type.max_objects() {
                    list.get_or_add(name);
                }
            }
        }
    }

    fn list_mut(&mut self, object_type: ObjectType) -> Option<&mut EntryList> {
        match object_type {
            ObjectType::SmallScenery => Some(&mut self.small_scenery),
            ObjectType::LargeScenery => Some(&mut self.large_scenery),
            ObjectType::Walls => Some(&mut self.walls),
            ObjectType::Paths => Some(&mut self.paths),
            ObjectType::PathBits => Some(&mut self.path_additions),
            _ => None,
        }
    }

    fn add_ride_type(&mut self, ride_type: u8) {
        if self.ride_types.is_mapped(ride_type.into()) {
            return;
        }
        match tables::ride_type_object(ride_type) {
            Some(name) => {
                let index = self.rides.get_or_add(name);
                self.ride_types.set(ride_type.into(), index);
            }
            None => warn!("No ride object for legacy ride type {}", ride_type),
        }
    }

    fn add_vehicle_type(&mut self, ride_type: u8, vehicle_type: u8) {
        if self.vehicle_types.is_mapped(vehicle_type.into()) {
            return;
        }
        match tables::vehicle_object(vehicle_type) {
            Some(name) => {
                let index = self.rides.get_or_add(name);
                self.vehicle_types.set(vehicle_type.into(), index);
                self.ride_types.set(ride_type.into(), index);
            }
            None => warn!("No ride object for legacy vehicle type {}", vehicle_type),
        }
    }

    fn add_small_scenery(&mut self, code: u8) {
        if !self.small_scenery_types.is_mapped(code.into()) {
            if let Some(name) = tables::small_scenery_object(code) {
                let index = self.small_scenery.get_or_add(name);
                self.small_scenery_types.set(code.into(), index);
            }
        }
    }

    fn add_large_scenery(&mut self, code: u16) {
        let Ok(code) = u8::try_from(code) else {
            warn!("Large scenery type {} out of range", code);
            return;
        };
        if !self.large_scenery_types.is_mapped(code.into()) {
            if let Some(name) = tables::large_scenery_object(code) {
                let index = self.large_scenery.get_or_add(name);
                self.large_scenery_types.set(code.into(), index);
            }
        }
    }

    pub(crate) fn add_wall(&mut self, code: u8) {
        if !self.wall_types.is_mapped(code.into()) {
            if let Some(name) = tables::wall_object(code) {
                let index = self.walls.get_or_add(name);
                self.wall_types.set(code.into(), index);
            }
        }
    }

    pub(crate) fn add_path(&mut self, code: u8) {
        if !self.path_types.is_mapped(code.into()) {
            if let Some(name) = tables::path_object(code) {
                let index = self.paths.get_or_add(name);
                self.path_types.set(code.into(), index);
            }
        }
    }

    /// Broken additions share the entry of their intact version.
    pub(crate) fn add_path_addition(&mut self, code: u8) {
        if code == tables::path_addition::NONE || self.path_addition_types.is_mapped(code.into()) {
            return;
        }
        let normalised = tables::normalise_path_addition(code);
        if !self.path_addition_types.is_mapped(normalised.into()) {
            if let Some(name) = tables::path_addition_object(normalised) {
                let index = self.path_additions.get_or_add(name);
                self.path_addition_types.set(normalised.into(), index);
            }
        }
        if let Some(index) = self.path_addition_types.get(normalised.into()) {
            self.path_addition_types.set(code.into(), index.into());
        }
    }

    fn add_scenery_theme(&mut self, theme: u8) {
        let Some(slot) = self.scenery_themes.get(theme as usize) else {
            warn!("Unknown scenery theme {}", theme);
            return;
        };
        if *slot != ThemeSlot::Unmapped {
            return;
        }
        let mapped = match tables::scenery_group_object(theme) {
            None => ThemeSlot::General,
            Some(name) => {
                let max = ObjectType::SceneryGroup.max_objects();
                if self.scenery_groups.index_of(name).is_none() && self.scenery_groups.len() >= max {
                    warn!("More than {} scenery groups in park, {} not added", max, name);
                    return;
                }
                match u8::try_from(self.scenery_groups.get_or_add(name)) {
                    Ok(index) => ThemeSlot::Group(index),
                    Err(_) => return,
                }
            }
        };
        self.scenery_themes[theme as usize] = mapped;
    }

    pub fn ride_entry(&self, ride_type: u8) -> Option<u8> {
        self.ride_types.get(ride_type.into())
    }

    pub fn vehicle_entry(&self, vehicle_type: u8) -> Option<u8> {
        self.vehicle_types.get(vehicle_type.into())
    }

    pub fn small_scenery_entry(&self, code: u8) -> Option<u8> {
        self.small_scenery_types.get(code.into())
    }

    pub fn large_scenery_entry(&self, code: u16) -> Option<u8> {
        self.large_scenery_types.get(code.into())
    }

    pub fn wall_entry(&self, code: u8) -> Option<u8> {
        self.wall_types.get(code.into())
    }

    pub fn path_entry(&self, code: u8) -> Option<u8> {
        self.path_types.get(code.into())
    }

    pub fn path_addition_entry(&self, code: u8) -> Option<u8> {
        self.path_addition_types.get(code.into())
    }

    pub fn scenery_theme(&self, theme: u8) -> ThemeSlot {
        self.scenery_themes
            .get(theme as usize)
            .copied()
            .unwrap_or_default()
    }

    /// Every object the park needs, in load order.
    pub fn required_objects(&self) -> Vec<ObjectEntry> {
        let lists = [
            (ObjectType::Ride, &self.rides),
            (ObjectType::SmallScenery, &self.small_scenery),
            (ObjectType::LargeScenery, &self.large_scenery),
            (ObjectType::Walls, &self.walls),
            (ObjectType::Paths, &self.paths),
            (ObjectType::PathBits, &self.path_additions),
            (ObjectType::SceneryGroup, &self.scenery_groups),
        ];
        let mut entries: Vec<ObjectEntry> = lists
            .iter()
            .flat_map(|(object_type, list)| {
                list.names()
                    .iter()
                    .map(|name| ObjectEntry::new(*object_type, name))
            })
            .collect();
        entries.extend(
            tables::BANNER_OBJECTS
                .iter()
                .map(|name| ObjectEntry::new(ObjectType::Banners, name)),
        );
        entries.push(ObjectEntry::new(
            ObjectType::ParkEntrance,
            tables::DEFAULT_PARK_ENTRANCE,
        ));
        entries.extend(
            self.water
                .names()
                .iter()
                .map(|name| ObjectEntry::new(ObjectType::Water, name)),
        );
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(item: u8, related_ride: u8, kind: u8) -> ResearchRecord {
        ResearchRecord {
            item,
            related_ride,
            kind,
            flags: 0,
            category: 0,
        }
    }

    fn separator(item: u8) -> ResearchRecord {
        ResearchRecord {
            item,
            related_ride: 0,
            kind: 0,
            flags: research::FLAGS_SEPARATOR,
            category: 0,
        }
    }

    #[test]
    fn test_defaults() {
        let mut mappings = ObjectMappings::default();
        mappings.add_defaults();
        assert_eq!(mappings.scenery_groups.len(), 6);
        assert_eq!(mappings.paths.names()[0], "TARMAC");
        assert_eq!(mappings.paths.len(), 8);
    }

    #[test]
    fn test_research_ride_with_and_without_vehicles() {
        let mut mappings = ObjectMappings::default();
        mappings.add_from_research(&[
            record(tables::ride::MERRY_GO_ROUND, 0, research::TYPE_RIDE),
            separator(research::END_AVAILABLE),
            record(19, 0, research::TYPE_RIDE),
            record(0, 19, research::TYPE_VEHICLE),
            separator(research::END),
            record(2, 0, research::TYPE_RIDE),
        ]);
        assert_eq!(mappings.rides.names()[0], "MGR1");
        assert!(mappings.ride_entry(19).is_some());
        assert_eq!(mappings.ride_entry(19), mappings.vehicle_entry(0));
        assert_eq!(mappings.ride_entry(2), None);
    }

    #[test]
    fn test_themes() {
        let mut mappings = ObjectMappings::default();
        mappings.add_defaults();
        mappings.add_scenery_theme(0);
        mappings.add_scenery_theme(1);
        assert_eq!(mappings.scenery_theme(0), ThemeSlot::General);
        assert_eq!(mappings.scenery_theme(1), ThemeSlot::Group(6));
        assert_eq!(mappings.scenery_theme(2), ThemeSlot::Unmapped);
        assert_eq!(mappings.scenery_groups.names()[6], "SCGMINE");
    }

    #[test]
    fn test_broken_path_addition_shares_entry() {
        let mut mappings = ObjectMappings::default();
        mappings.add_path_addition(tables::path_addition::BROKEN_BIN);
        mappings.add_path_addition(tables::path_addition::BIN);
        mappings.add_path_addition(tables::path_addition::NONE);
        assert_eq!(mappings.path_additions.names(), &["LITTER1".to_string()]);
        assert_eq!(mappings.path_addition_entry(tables::path_addition::BROKEN_BIN), Some(0));
        assert_eq!(mappings.path_addition_entry(tables::path_addition::BIN), Some(0));
    }

    #[test]
    fn test_required_objects_order() {
        let mut mappings = ObjectMappings::default();
        mappings.add_defaults();
        mappings.water.get_or_add("WTRCYAN");
        let required = mappings.required_objects();
        assert_eq!(required.len(), 6 + 8 + 9 + 1 + 1);
        assert_eq!(required[0].object_type(), Some(ObjectType::Paths));
        assert_eq!(required.last().unwrap().name(), "WTRCYAN");
    }
}
