//! Converts legacy tile elements and patches known map mistakes.

use tracing::{debug, warn};

use super::image::{ParkImage, RawElement, RawTile};
use super::layout::tile::{self, entrance, path, scenery, surface, track};
use super::mapping::ObjectMappings;
use super::tables::{self, colour};
use super::target::{
    Banner, BannerElement, ElementKind, Entrance, ImportTarget, LargeScenery, ParkEntrance, Path,
    Scenery, Surface, Tile, TileElement, Track, Wall,
};
use crate::config::import::MAX_PARK_ENTRANCES;
use crate::error::Result;

/// Legacy path surface a park entrance falls back to when it has none.
const PATH_TARMAC_GREY: u8 = 4;

/// Small scenery whose secondary colour is always white.
const WHITE_SECONDARY: [u8; 5] = [157, 162, 168, 170, 171];
/// Small scenery painted red and yellow.
const RED_AND_YELLOW: [u8; 2] = [65, 68];

/// Converts every tile of the park into `target`.
pub fn import_tiles(
    image: &ParkImage,
    tiles: &[RawTile],
    mappings: &ObjectMappings,
    target: &mut ImportTarget,
) -> Result<()> {
    let mut converted = Vec::with_capacity(tiles.len());
    for raw in tiles {
        let mut elements = Vec::with_capacity(raw.elements.len());
        for element in &raw.elements {
            convert_element(element, mappings, &mut elements);
        }
        let tile = Tile {
            x: raw.x,
            y: raw.y,
            elements,
        };
        collect_entrances(&tile, &mut target.park_entrances);
        import_banners(image, &tile, target)?;
        converted.push(tile);
    }
    target.tiles = converted;
    Ok(())
}

fn convert_element(raw: &RawElement, mappings: &ObjectMappings, out: &mut Vec<TileElement>) {
    let unused = raw.base_height() == tile::HEIGHT_UNUSED;
    let (base_height, clearance_height) = if unused {
        (raw.base_height(), raw.clearance_height())
    } else {
        (raw.base_height() / 2, raw.clearance_height() / 2)
    };
    let make = |direction: u8, kind: ElementKind| TileElement {
        base_height,
        clearance_height,
        direction,
        ghost: raw.flags() & tile::FLAG_GHOST != 0,
        kind,
    };

    match raw.kind() {
        tile::SURFACE => out.push(make(raw.direction(), ElementKind::Surface(convert_surface(raw)))),
        tile::PATH => match convert_path(raw, mappings) {
            Some(p) => out.push(make(0, ElementKind::Path(p))),
            None => warn!("Dropping path of unmapped type {}", raw.path_type()),
        },
        tile::TRACK => out.push(make(
            raw.direction(),
            ElementKind::Track(Track {
                track_type: raw.prop(track::TYPE),
                sequence: raw.prop(track::SEQUENCE) & 0x0F,
                colour_scheme: raw.prop(track::SEQUENCE) >> 4,
                ride_index: raw.prop(track::RIDE_INDEX),
            }),
        )),
        tile::SMALL_SCENERY => {
            let code = raw.small_scenery_type();
            let Some(entry) = mappings.small_scenery_entry(code) else {
                warn!("Dropping small scenery of unmapped type {}", code);
                return;
            };
            let (primary_colour, secondary_colour) = if unused {
                (raw.prop(scenery::PRIMARY_COLOUR), raw.prop(scenery::SECONDARY_COLOUR))
            } else {
                small_scenery_colours(code, raw)
            };
            out.push(make(
                raw.direction(),
                ElementKind::SmallScenery(Scenery {
                    entry,
                    age: raw.prop(scenery::AGE),
                    primary_colour,
                    secondary_colour,
                }),
            ));
        }
        tile::LARGE_SCENERY => {
            let code = raw.large_scenery_type();
            let Some(entry) = mappings.large_scenery_entry(code) else {
                warn!("Dropping large scenery of unmapped type {}", code);
                return;
            };
            let sequence = raw.prop(1) >> 2;
            let primary = raw.prop(scenery::PRIMARY_COLOUR) & scenery::COLOUR_MASK;
            let secondary = raw.prop(scenery::SECONDARY_COLOUR) & scenery::COLOUR_MASK;
            let (primary_colour, secondary_colour) = if unused {
                (primary, secondary)
            } else {
                (tables::colour(primary), tables::colour(secondary))
            };
            out.push(make(
                raw.direction(),
                ElementKind::LargeScenery(LargeScenery {
                    entry,
                    sequence,
                    primary_colour,
                    secondary_colour,
                }),
            ));
        }
        tile::ENTRANCE => {
            let entrance_type = raw.prop(entrance::TYPE);
            let path_entry = (entrance_type == tile::ENTRANCE_TYPE_PARK).then(|| {
                let code = match raw.prop(entrance::PATH_TYPE) {
                    0 => PATH_TARMAC_GREY,
                    code => code,
                };
                mappings.path_entry(code).map(|e| e & 0x7F)
            });
            out.push(make(
                raw.direction(),
                ElementKind::Entrance(Entrance {
                    entrance_type,
                    index: raw.prop(entrance::INDEX),
                    path_entry: path_entry.flatten(),
                    ride_index: raw.prop(entrance::RIDE_INDEX),
                }),
            ));
        }
        tile::WALL => {
            let colour_a = tables::colour(raw.wall_colour());
            for edge in 0..4u8 {
                let Some(wall_type) = raw.wall_type(edge) else {
                    continue;
                };
                let (wall_type, colours) = tables::convert_wall(wall_type, [colour_a, 0, 0]);
                match mappings.wall_entry(wall_type) {
                    Some(entry) => out.push(make(edge, ElementKind::Wall(Wall { entry, colours }))),
                    None => warn!("Dropping wall of unmapped type {}", wall_type),
                }
            }
        }
        tile::BANNER => out.push(make(
            raw.direction(),
            ElementKind::Banner(BannerElement {
                index: raw.prop(tile::banner::INDEX),
                position: raw.prop(tile::banner::POSITION),
            }),
        )),
        other => debug!("Skipping element of unknown kind {:#04x}", other),
    }
}

fn convert_surface(raw: &RawElement) -> Surface {
    let slope = raw.prop(surface::SLOPE);
    let terrain_byte = raw.prop(surface::TERRAIN);
    let terrain_code = ((terrain_byte >> 5) & 0x07) | ((raw.type_byte() & 0x01) << 3);
    let edge_code = ((slope >> 5) & 0x07) | if raw.type_byte() & 0x80 != 0 { 0x08 } else { 0 };
    Surface {
        terrain: tables::terrain(terrain_code).unwrap_or_default(),
        edge: tables::terrain_edge(edge_code).unwrap_or_default(),
        slope: slope & 0x1F,
        water_height: terrain_byte & 0x1F,
        grass_length: raw.prop(surface::GRASS_LENGTH),
        ownership: raw.prop(surface::OWNERSHIP),
    }
}

fn convert_path(raw: &RawElement, mappings: &ObjectMappings) -> Option<Path> {
    let code = raw.path_type();
    let entry = mappings.path_entry(code)?;
    let legacy_addition = raw.path_addition();
    let normalised = tables::normalise_path_addition(legacy_addition);
    let addition = match mappings.path_addition_entry(normalised) {
        Some(index) if legacy_addition != tables::path_addition::NONE => index + 1,
        _ => 0,
    };
    Some(Path {
        entry,
        queue: tables::path_is_queue(code),
        sloped: raw.prop(path::SLOPE) & path::SLOPED != 0,
        slope_direction: raw.prop(path::SLOPE) & 0x03,
        edges: raw.prop(path::EDGES),
        addition,
        addition_broken: normalised != legacy_addition,
        ride_index: raw.prop(path::RIDE_INDEX),
    })
}

fn small_scenery_colours(code: u8, raw: &RawElement) -> (u8, u8) {
    if RED_AND_YELLOW.contains(&code) {
        return (colour::BRIGHT_RED, colour::YELLOW);
    }
    let primary = tables::colour(raw.prop(scenery::PRIMARY_COLOUR) & scenery::COLOUR_MASK);
    let secondary = if WHITE_SECONDARY.contains(&code) {
        colour::WHITE
    } else {
        raw.prop(scenery::SECONDARY_COLOUR) & scenery::COLOUR_MASK
    };
    (primary, secondary)
}

fn collect_entrances(tile: &Tile, entrances: &mut Vec<ParkEntrance>) {
    for element in &tile.elements {
        let ElementKind::Entrance(e) = &element.kind else {
            continue;
        };
        if e.entrance_type != tile::ENTRANCE_TYPE_PARK || e.index & 0x0F != 0 {
            continue;
        }
        if entrances.len() >= MAX_PARK_ENTRANCES {
            warn!("Park has more than {} entrances", MAX_PARK_ENTRANCES);
            continue;
        }
        entrances.push(ParkEntrance {
            x: i32::from(tile.x) * 32,
            y: i32::from(tile.y) * 32,
            z: i32::from(element.base_height) * 8,
            direction: element.direction,
        });
    }
}

fn import_banners(image: &ParkImage, tile: &Tile, target: &mut ImportTarget) -> Result<()> {
    for element in &tile.elements {
        let ElementKind::Banner(b) = &element.kind else {
            continue;
        };
        if target.banners.contains_key(&b.index) {
            continue;
        }
        let record = match image.banner(b.index.into()) {
            Ok(record) => record,
            Err(e) => {
                warn!("Banner element at ({}, {}) refers to a missing banner: {}", tile.x, tile.y, e);
                continue;
            }
        };
        target.banners.insert(
            b.index,
            Banner {
                banner_type: record.banner_type,
                flags: record.flags,
                colour: tables::colour(record.colour),
                text_colour: record.text_colour,
                text: image.user_string(record.string_idx)?,
                x: record.x,
                y: record.y,
            },
        );
    }
    Ok(())
}

/// Tiles of the shipped scenarios that should be buyable but are not,
/// keyed by scenario slot.
const LAND_OWNERSHIP_FIXES: &[(u16, &[(u16, u16)])] = &[
    (1, &[(97, 18), (99, 19), (83, 34)]),
    (2, &[(49, 66)]),
    (7, &[(74, 70), (75, 70), (76, 70), (77, 73), (80, 77)]),
    (8, &[(64, 102)]),
    (13, &[(98, 69), (98, 70), (103, 64), (53, 79), (86, 93), (87, 93)]),
    (14, &[(93, 105), (63, 34), (76, 25), (85, 31), (96, 47), (96, 48)]),
    (43, &[(85, 73)]),
    (50, &[(64, 77), (61, 66), (61, 67), (39, 20)]),
];

/// Marks the known unowned tiles of a shipped scenario as owned. Returns the
/// number of tiles changed.
pub fn fix_land_ownership(slot: u16, target: &mut ImportTarget) -> usize {
    let Some((_, coords)) = LAND_OWNERSHIP_FIXES.iter().find(|(s, _)| *s == slot) else {
        return 0;
    };
    let mut fixed = 0;
    for &(x, y) in coords.iter() {
        match target.tile_mut(x, y).and_then(Tile::surface_mut) {
            Some(surface) => {
                surface.ownership |= tile::OWNERSHIP_OWNED;
                fixed += 1;
            }
            None => warn!("No surface at ({}, {}) to fix ownership of", x, y),
        }
    }
    debug!("Fixed land ownership of {} tiles in scenario slot {}", fixed, slot);
    fixed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legacy::image::GameVersion;

    fn mappings() -> ObjectMappings {
        let mut mappings = ObjectMappings::default();
        mappings.add_defaults();
        mappings
    }

    fn convert(raw: RawElement, mappings: &ObjectMappings) -> Vec<TileElement> {
        let mut out = Vec::new();
        convert_element(&raw, mappings, &mut out);
        out
    }

    #[test]
    fn test_surface_halves_heights_and_maps_terrain() {
        // terrain 3 (rock) in the high bits, water height 4; edge style 1
        let raw = RawElement([0x00, 0x80, 14, 14, 0x20 | 0x02, 0x60 | 0x04, 1, 0x20]);
        let out = convert(raw, &mappings());
        assert_eq!(out[0].base_height, 7);
        assert_eq!(
            out[0].kind,
            ElementKind::Surface(Surface {
                terrain: 3,
                edge: 0,
                slope: 2,
                water_height: 4,
                grass_length: 1,
                ownership: 0x20,
            })
        );
    }

    #[test]
    fn test_unused_height_is_kept() {
        let raw = RawElement([0x00, 0x80, 255, 255, 0, 0, 0, 0]);
        let out = convert(raw, &mappings());
        assert_eq!(out[0].base_height, 255);
    }

    #[test]
    fn test_broken_path_addition() {
        let mut mappings = mappings();
        mappings.add_path(0);
        mappings.add_path_addition(tables::path_addition::BROKEN_BIN);
        let raw = RawElement([0x04, 0x80, 4, 6, 0x00, tables::path_addition::BROKEN_BIN, 0x0F, 0]);
        let out = convert(raw, &mappings);
        let ElementKind::Path(p) = &out[0].kind else {
            panic!("expected a path");
        };
        assert_eq!(p.entry, 0);
        assert!(p.queue);
        assert_eq!(p.addition, 1);
        assert!(p.addition_broken);
    }

    #[test]
    fn test_unmapped_scenery_is_dropped() {
        let raw = RawElement([0x0C, 0x80, 4, 6, 0, 0, 0, 0]);
        assert!(convert(raw, &mappings()).is_empty());
    }

    #[test]
    fn test_small_scenery_colour_exceptions() {
        let raw = RawElement([0x0C, 0x80, 4, 6, 65, 0, 3, 4]);
        assert_eq!(small_scenery_colours(65, &raw), (colour::BRIGHT_RED, colour::YELLOW));
        assert_eq!(small_scenery_colours(157, &raw), (colour::LIGHT_PURPLE, colour::WHITE));
        assert_eq!(small_scenery_colours(0, &raw), (colour::LIGHT_PURPLE, 4));
    }

    #[test]
    fn test_walls_split_per_edge() {
        let mut mappings = mappings();
        mappings.add_wall(9);
        mappings.add_wall(1);
        // edge 0 type 9, edge 2 type 1
        let raw = RawElement([0x14, 0x80, 4, 8, 0x00, 0x01 | 0x10, 0xF2, 0xF0]);
        let out = convert(raw, &mappings);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].direction, 0);
        assert_eq!(out[1].direction, 2);
    }

    #[test]
    fn test_park_entrances_capped() {
        let element = TileElement {
            base_height: 7,
            clearance_height: 9,
            direction: 1,
            ghost: false,
            kind: ElementKind::Entrance(Entrance {
                entrance_type: tile::ENTRANCE_TYPE_PARK,
                index: 0,
                path_entry: Some(0),
                ride_index: 0,
            }),
        };
        let tile = Tile {
            x: 3,
            y: 4,
            elements: vec![element; 6],
        };
        let mut entrances = Vec::new();
        collect_entrances(&tile, &mut entrances);
        assert_eq!(entrances.len(), MAX_PARK_ENTRANCES);
        assert_eq!(
            entrances[0],
            ParkEntrance {
                x: 96,
                y: 128,
                z: 56,
                direction: 1
            }
        );
    }

    #[test]
    fn test_fix_land_ownership() {
        let mut target = ImportTarget::new(GameVersion::Classic, 128);
        target.tiles.push(Tile {
            x: 49,
            y: 66,
            elements: vec![TileElement {
                base_height: 7,
                clearance_height: 7,
                direction: 0,
                ghost: false,
                kind: ElementKind::Surface(Surface {
                    terrain: 0,
                    edge: 0,
                    slope: 0,
                    water_height: 0,
                    grass_length: 0,
                    ownership: 0,
                }),
            }],
        });
        assert_eq!(fix_land_ownership(2, &mut target), 1);
        assert_eq!(target.tile(49, 66).unwrap().surface().unwrap().ownership, 0x20);
        assert_eq!(fix_land_ownership(3, &mut target), 0);
    }
}
