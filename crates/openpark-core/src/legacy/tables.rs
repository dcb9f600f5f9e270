//! Lookup tables translating legacy codes into modern ones.
//!
//! Every table is indexed by the legacy code. Object names are stored
//! trimmed; an empty name means the code has no object.

use tracing::warn;

/// Modern colour codes.
pub mod colour {
    pub const BLACK: u8 = 0;
    pub const GREY: u8 = 1;
    pub const WHITE: u8 = 2;
    pub const DARK_PURPLE: u8 = 3;
    pub const LIGHT_PURPLE: u8 = 4;
    pub const BRIGHT_PURPLE: u8 = 5;
    pub const DARK_BLUE: u8 = 6;
    pub const LIGHT_BLUE: u8 = 7;
    pub const ICY_BLUE: u8 = 8;
    pub const TEAL: u8 = 9;
    pub const AQUAMARINE: u8 = 10;
    pub const SATURATED_GREEN: u8 = 11;
    pub const DARK_GREEN: u8 = 12;
    pub const MOSS_GREEN: u8 = 13;
    pub const BRIGHT_GREEN: u8 = 14;
    pub const OLIVE_GREEN: u8 = 15;
    pub const DARK_OLIVE_GREEN: u8 = 16;
    pub const BRIGHT_YELLOW: u8 = 17;
    pub const YELLOW: u8 = 18;
    pub const DARK_YELLOW: u8 = 19;
    pub const LIGHT_ORANGE: u8 = 20;
    pub const DARK_ORANGE: u8 = 21;
    pub const LIGHT_BROWN: u8 = 22;
    pub const SATURATED_BROWN: u8 = 23;
    pub const DARK_BROWN: u8 = 24;
    pub const SALMON_PINK: u8 = 25;
    pub const BORDEAUX_RED: u8 = 26;
    pub const SATURATED_RED: u8 = 27;
    pub const BRIGHT_RED: u8 = 28;
    pub const DARK_PINK: u8 = 29;
    pub const BRIGHT_PINK: u8 = 30;
    pub const LIGHT_PINK: u8 = 31;
}

/// Legacy ride type codes referenced by the importer.
pub mod ride {
    pub const INVERTED_ROLLER_COASTER: u8 = 3;
    pub const HEDGE_MAZE: u8 = 20;
    pub const SPIRAL_SLIDE: u8 = 21;
    pub const RIVER_RAPIDS: u8 = 24;
    pub const DODGEMS: u8 = 25;
    pub const ICE_CREAM_STALL: u8 = 28;
    pub const CHIPS_STALL: u8 = 29;
    pub const DRINK_STALL: u8 = 30;
    pub const CANDYFLOSS_STALL: u8 = 31;
    pub const BURGER_BAR: u8 = 32;
    pub const MERRY_GO_ROUND: u8 = 33;
    pub const BALLOON_STALL: u8 = 34;
    pub const INFORMATION_KIOSK: u8 = 35;
    pub const TOILETS: u8 = 36;
    pub const SOUVENIR_STALL: u8 = 43;
    pub const PIZZA_STALL: u8 = 45;
    pub const POPCORN_STALL: u8 = 48;
    pub const HOT_DOG_STALL: u8 = 55;
    pub const EXOTIC_SEA_FOOD_STALL: u8 = 56;
    pub const HAT_STALL: u8 = 57;
    pub const TOFFEE_APPLE_STALL: u8 = 58;
    pub const UNUSED_40: u8 = 64;
    pub const UNUSED_44: u8 = 68;
    pub const T_SHIRT_STALL: u8 = 78;
    pub const DOUGHNUT_SHOP: u8 = 80;
    pub const COFFEE_SHOP: u8 = 82;
    pub const FRIED_CHICKEN_STALL: u8 = 83;
    pub const LEMONADE_STALL: u8 = 84;

    pub const COUNT: usize = 85;
}

/// Modern ride type numbers.
pub mod modern_ride {
    pub const MAZE: u8 = 20;
    pub const DODGEMS: u8 = 25;
    pub const MERRY_GO_ROUND: u8 = 33;
    pub const CIRCUS: u8 = 49;
    pub const COMPACT_INVERTED_COASTER: u8 = 73;
    pub const NULL: u8 = 255;
    pub const COUNT: usize = 91;
}

pub mod path_addition {
    pub const NONE: u8 = 0;
    pub const LAMP_1: u8 = 1;
    pub const LAMP_2: u8 = 2;
    pub const BIN: u8 = 3;
    pub const BENCH: u8 = 4;
    pub const JUMPING_FOUNTAIN: u8 = 5;
    pub const LAMP_3: u8 = 6;
    pub const LAMP_4: u8 = 7;
    pub const BROKEN_LAMP_1: u8 = 8;
    pub const BROKEN_LAMP_2: u8 = 9;
    pub const BROKEN_BIN: u8 = 10;
    pub const BROKEN_BENCH: u8 = 11;
    pub const BROKEN_LAMP_3: u8 = 12;
    pub const BROKEN_LAMP_4: u8 = 13;
    pub const JUMPING_SNOW: u8 = 14;
}

pub mod wall {
    pub const GLASS_SMOOTH: u8 = 11;
    pub const WOODEN_PANEL_FENCE: u8 = 12;
    pub const WOODEN_PANEL_FENCE_WITH_GATE: u8 = 13;
    pub const GLASS_PANELS: u8 = 22;
    pub const WHITE_WOODEN_PANEL_FENCE: u8 = 26;
    pub const RED_WOODEN_PANEL_FENCE: u8 = 27;
    pub const SMALL_GREY_CASTLE: u8 = 35;
    pub const LARGE_GREY_CASTLE: u8 = 42;
    pub const LARGE_GREY_CASTLE_CROSS: u8 = 43;
    pub const LARGE_GREY_CASTLE_GATE: u8 = 44;
    pub const LARGE_GREY_CASTLE_WINDOW: u8 = 45;
    pub const MEDIUM_GREY_CASTLE: u8 = 46;
    pub const WOODEN_PANEL_FENCE_WITH_SNOW: u8 = 50;
}

pub const DEFAULT_PARK_ENTRANCE: &str = "PKENT1";

pub const BANNER_OBJECTS: [&str; 9] = [
    "BN1", "BN2", "BN3", "BN4", "BN5", "BN6", "BN7", "BN8", "BN9",
];

/// Scenery groups every imported park receives.
pub const DEFAULT_SCENERY_GROUPS: [&str; 6] = [
    "SCGTREES", "SCGSHRUB", "SCGGARDN", "SCGFENCE", "SCGWALLS", "SCGPATHX",
];

/// Path surfaces every imported park receives.
pub const DEFAULT_PATHS: [&str; 8] = [
    "TARMAC", "TARMACG", "TARMACB", "PATHCRZY", "PATHSPCE", "PATHDIRT", "PATHASH", "ROAD",
];

const COLOURS: [u8; 32] = {
    use colour::*;
    [
        BLACK, GREY, WHITE, LIGHT_PURPLE, BRIGHT_PURPLE, DARK_BLUE, LIGHT_BLUE, TEAL,
        SATURATED_GREEN, DARK_GREEN, MOSS_GREEN, BRIGHT_GREEN, OLIVE_GREEN, DARK_OLIVE_GREEN,
        YELLOW, DARK_YELLOW, LIGHT_ORANGE, DARK_ORANGE, LIGHT_BROWN, SATURATED_BROWN,
        DARK_BROWN, SALMON_PINK, BORDEAUX_RED, SATURATED_RED, BRIGHT_RED, BRIGHT_PINK,
        LIGHT_PINK, DARK_PINK, DARK_PURPLE, AQUAMARINE, BRIGHT_YELLOW, ICY_BLUE,
    ]
};

mod terrain {
    pub const GRASS: u8 = 0;
    pub const SAND: u8 = 1;
    pub const DIRT: u8 = 2;
    pub const ROCK: u8 = 3;
    pub const MARTIAN: u8 = 4;
    pub const CHECKERBOARD: u8 = 5;
    pub const GRASS_CLUMPS: u8 = 6;
    pub const ICE: u8 = 7;
    pub const GRID_RED: u8 = 8;
    pub const GRID_YELLOW: u8 = 9;
    pub const GRID_BLUE: u8 = 10;
    pub const GRID_GREEN: u8 = 11;

    pub const EDGE_ROCK: u8 = 0;
    pub const EDGE_WOOD_RED: u8 = 1;
    pub const EDGE_WOOD_BLACK: u8 = 2;
    pub const EDGE_ICE: u8 = 3;
}

// Roof surfaces have no modern counterpart and fall back to dirt or rock.
const TERRAINS: [u8; 16] = {
    use terrain::*;
    [
        GRASS, SAND, DIRT, ROCK, MARTIAN, CHECKERBOARD, GRASS_CLUMPS, DIRT, ICE, DIRT, DIRT,
        ROCK, GRID_RED, GRID_YELLOW, GRID_BLUE, GRID_GREEN,
    ]
};

const TERRAIN_EDGES: [u8; 16] = {
    use terrain::*;
    [
        EDGE_ROCK, EDGE_ROCK, EDGE_ROCK, EDGE_WOOD_RED, EDGE_ROCK, EDGE_ROCK, EDGE_WOOD_BLACK,
        EDGE_ROCK, EDGE_ICE, EDGE_ROCK, EDGE_ROCK, EDGE_ROCK, EDGE_ROCK, EDGE_ROCK, EDGE_ROCK,
        EDGE_ROCK,
    ]
};

/// Converts a legacy colour; unknown colours become black.
pub fn colour(legacy: u8) -> u8 {
    match COLOURS.get(legacy as usize) {
        Some(c) => *c,
        None => {
            warn!("Unsupported legacy colour: {}", legacy);
            colour::BLACK
        }
    }
}

pub fn terrain(legacy: u8) -> Option<u8> {
    TERRAINS.get(legacy as usize).copied()
}

pub fn terrain_edge(legacy: u8) -> Option<u8> {
    TERRAIN_EDGES.get(legacy as usize).copied()
}

/// Modern ride type for a legacy ride type. `None` for unknown codes and for
/// the two unused slots.
pub fn ride_type(legacy: u8) -> Option<u8> {
    RIDE_TYPES
        .get(legacy as usize)
        .copied()
        .filter(|t| *t != modern_ride::NULL)
}

/// Music style a ride plays when the park predates music settings.
pub fn default_music(modern_ride_type: u8) -> u8 {
    const DODGEMS_BEAT: u8 = 0;
    const FAIRGROUND_ORGAN: u8 = 1;
    const CIRCUS_SHOW: u8 = 8;
    const GENTLE: u8 = 12;
    match modern_ride_type {
        modern_ride::MERRY_GO_ROUND => FAIRGROUND_ORGAN,
        modern_ride::DODGEMS => DODGEMS_BEAT,
        modern_ride::CIRCUS => CIRCUS_SHOW,
        _ => GENTLE,
    }
}

/// False for rides without trains: mazes, slides and every stall.
pub fn ride_type_uses_vehicles(legacy: u8) -> bool {
    use ride::*;
    !matches!(
        legacy,
        HEDGE_MAZE
            | SPIRAL_SLIDE
            | ICE_CREAM_STALL
            | CHIPS_STALL
            | DRINK_STALL
            | CANDYFLOSS_STALL
            | BURGER_BAR
            | BALLOON_STALL
            | INFORMATION_KIOSK
            | TOILETS
            | SOUVENIR_STALL
            | PIZZA_STALL
            | POPCORN_STALL
            | HOT_DOG_STALL
            | EXOTIC_SEA_FOOD_STALL
            | HAT_STALL
            | TOFFEE_APPLE_STALL
            | UNUSED_40
            | UNUSED_44
            | T_SHIRT_STALL
            | DOUGHNUT_SHOP
            | COFFEE_SHOP
            | FRIED_CHICKEN_STALL
            | LEMONADE_STALL
    )
}

fn object_at(table: &'static [&'static str], index: u8) -> Option<&'static str> {
    table
        .get(index as usize)
        .copied()
        .filter(|name| !name.is_empty())
}

pub fn ride_type_object(legacy: u8) -> Option<&'static str> {
    object_at(&RIDE_TYPE_OBJECTS, legacy)
}

pub fn vehicle_object(legacy: u8) -> Option<&'static str> {
    object_at(&VEHICLE_OBJECTS, legacy)
}

pub fn small_scenery_object(legacy: u8) -> Option<&'static str> {
    object_at(&SMALL_SCENERY_OBJECTS, legacy)
}

pub fn large_scenery_object(legacy: u8) -> Option<&'static str> {
    object_at(&LARGE_SCENERY_OBJECTS, legacy)
}

pub fn wall_object(legacy: u8) -> Option<&'static str> {
    object_at(&WALL_OBJECTS, legacy)
}

pub fn path_object(legacy: u8) -> Option<&'static str> {
    object_at(&PATH_OBJECTS, legacy)
}

pub fn path_addition_object(legacy: u8) -> Option<&'static str> {
    object_at(&PATH_ADDITION_OBJECTS, legacy)
}

/// Scenery group for a research theme. Themes whose items belong to the
/// general set have no group of their own.
pub fn scenery_group_object(theme: u8) -> Option<&'static str> {
    object_at(&SCENERY_GROUP_OBJECTS, theme)
}

pub fn water_object(legacy: u8) -> Option<&'static str> {
    object_at(&WATER_OBJECTS, legacy)
}

pub fn scenery_theme_count() -> usize {
    SCENERY_THEME_OBJECTS.len()
}

/// Every scenery object a research theme unlocks.
pub fn scenery_theme_objects(theme: u8) -> &'static [&'static str] {
    SCENERY_THEME_OBJECTS
        .get(theme as usize)
        .copied()
        .unwrap_or(&[])
}

/// Ride entries tried in order when a modern ride type needs a default entry.
pub fn preferred_ride_entries(modern_ride_type: u8) -> &'static [&'static str] {
    PREFERRED_RIDE_ENTRIES
        .get(modern_ride_type as usize)
        .copied()
        .unwrap_or(&[])
}

pub fn path_is_queue(legacy: u8) -> bool {
    legacy <= 3
}

/// Maps broken lamps, bins and benches to their intact versions.
pub fn normalise_path_addition(legacy: u8) -> u8 {
    use path_addition::*;
    match legacy {
        BROKEN_LAMP_1 => LAMP_1,
        BROKEN_LAMP_2 => LAMP_2,
        BROKEN_BIN => BIN,
        BROKEN_BENCH => BENCH,
        BROKEN_LAMP_3 => LAMP_3,
        BROKEN_LAMP_4 => LAMP_4,
        other => other,
    }
}

/// Source of one vehicle colour when a legacy colour scheme is copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColourSource {
    Primary,
    Secondary,
    Fixed(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColourCopyDescriptor {
    pub body: ColourSource,
    pub trim: ColourSource,
    pub tertiary: ColourSource,
}

impl ColourCopyDescriptor {
    const fn new(body: ColourSource, trim: ColourSource, tertiary: ColourSource) -> Self {
        Self {
            body,
            trim,
            tertiary,
        }
    }

    /// Resolves the three vehicle colours from a legacy primary and secondary.
    pub fn apply(&self, primary: u8, secondary: u8) -> [u8; 3] {
        let pick = |source: ColourSource| match source {
            ColourSource::Primary => primary,
            ColourSource::Secondary => secondary,
            ColourSource::Fixed(c) => c,
        };
        [pick(self.body), pick(self.trim), pick(self.tertiary)]
    }
}

pub const VEHICLE_TYPE_COUNT: usize = 89;

/// Colour copy rule for a legacy vehicle type.
pub fn colour_scheme_copy(vehicle_type: u8) -> ColourCopyDescriptor {
    use ColourSource::*;
    match vehicle_type {
        // Suspended swinging cars, wooden mouse cars
        4 | 14 => ColourCopyDescriptor::new(Primary, Secondary, Secondary),
        // Stand-up coaster cars
        6 => ColourCopyDescriptor::new(Primary, Primary, Secondary),
        // Large monorail
        10 => ColourCopyDescriptor::new(Primary, Secondary, Fixed(colour::DARK_BLUE)),
        // Rapids boats
        36 => ColourCopyDescriptor::new(Primary, Fixed(colour::BLACK), Fixed(colour::BLACK)),
        // Stand-up twister train
        60 => ColourCopyDescriptor::new(Primary, Fixed(colour::BLACK), Secondary),
        _ => ColourCopyDescriptor::new(Primary, Secondary, Fixed(colour::BLACK)),
    }
}

/// Legacy wall types whose colours changed meaning. Returns the wall type to
/// look up and the three wall colours (already converted to modern codes).
pub fn convert_wall(wall_type: u8, colours: [u8; 3]) -> (u8, [u8; 3]) {
    use wall::*;
    let [mut a, mut b, c] = colours;
    let mut wall_type = wall_type;
    match wall_type {
        WOODEN_PANEL_FENCE | WOODEN_PANEL_FENCE_WITH_SNOW => a = colour::DARK_BROWN,
        WHITE_WOODEN_PANEL_FENCE => {
            wall_type = WOODEN_PANEL_FENCE;
            a = colour::WHITE;
        }
        RED_WOODEN_PANEL_FENCE => {
            wall_type = WOODEN_PANEL_FENCE;
            a = colour::SALMON_PINK;
        }
        WOODEN_PANEL_FENCE_WITH_GATE => {
            b = a;
            a = colour::DARK_BROWN;
        }
        GLASS_SMOOTH | GLASS_PANELS => b = colour::WHITE,
        SMALL_GREY_CASTLE
        | LARGE_GREY_CASTLE
        | LARGE_GREY_CASTLE_CROSS
        | LARGE_GREY_CASTLE_GATE
        | LARGE_GREY_CASTLE_WINDOW
        | MEDIUM_GREY_CASTLE => a = colour::GREY,
        _ => {}
    }
    (wall_type, [a, b, c])
}

const RIDE_TYPE_OBJECTS: [&str; 85] = [
    "PTCT1", "TOGST", "ARRSW1", "NEMT", "ZLDB", "NRL",
    "MONO2", "BATFL", "RBOAT", "WMOUSE", "STEEP1", "SPCAR",
    "SSC1", "BOB1", "OBS1", "SCHT1", "DING1", "AMT1",
    "CLIFT1", "ARRT1", "HMAZE", "HSKELT", "KART1", "LFB1",
    "RAPBOAT", "DODG1", "SWSH1", "SWSH2", "ICECR1", "CHPSH",
    "DRNKS", "CNDYF", "BURGB", "MGR1", "BALLN", "INFOK",
    "TLT1", "FWH1", "SIMPOD", "C3D", "TOPSP1", "SRINGS",
    "REVF1", "SOUVS", "BMVD", "PIZZS", "TWIST1", "HHBUILD",
    "POPCS", "CIRCUS1", "GTC", "BMSD", "MFT", "SFRIC1",
    "SMC1", "HOTDS", "SQDST", "HATST", "TOFFS", "VREEL",
    "SPBOAT", "MONBK", "VEKST", "SMONO", "", "REVCAR",
    "UTCAR", "GOLF1", "", "GDROP1", "FSAUC", "CHBUILD",
    "HELICAR", "SLCT", "CSTBOAT", "THCAR", "IVMC1", "JSKI",
    "TSHRT", "RFTBOAT", "DOUGH", "ENTERP", "COFFS", "CHCKS",
    "LEMST",
];

const VEHICLE_OBJECTS: [&str; 89] = [
    "SCHT1", "SCHT1", "PTCT1", "SLCT", "ARRSW1", "ZLDB",
    "TOGST", "WMSPIN", "BATFL", "SWANS", "MONO1", "CBOAT",
    "RBOAT", "NRL", "WMOUSE", "BBOAT", "PTCT1", "RCKC",
    "STEEP1", "SPCAR", "SKYTR", "WMMINE", "ARRSW2", "MONO2",
    "TRIKE", "SSC1", "BOB1", "DING1", "OBS1", "AMT1",
    "CLIFT1", "ARRT1", "STEEP2", "RCR", "TRUCK1", "KART1",
    "RAPBOAT", "LFB1", "DODG1", "SWSH1", "SWSH2", "MGR1",
    "FWH1", "SIMPOD", "C3D", "TOPSP1", "SRINGS", "REVF1",
    "BMVD", "CTCAR", "TWIST1", "HHBUILD", "ZLOG", "CIRCUS1",
    "GTC", "BMSD", "MFT", "SFRIC1", "VCR", "NRL2",
    "BMSU", "BMFL", "SMC1", "CLIFT2", "SMONO", "HELICAR",
    "VREEL", "REVCAR", "GOLF1", "SPBOAT", "VEKST", "BMRB",
    "UTCAR", "UTCARR", "", "GDROP1", "FSAUC", "CHBUILD",
    "MONBK", "ARRT2", "NEMT", "CSTBOAT", "SLCFO", "JSKI",
    "RFTBOAT", "AML1", "THCAR", "IVMC1", "ENTERP",
];

const SMALL_SCENERY_OBJECTS: [&str; 244] = [
    "TL0", "TL1", "TL2", "TL3", "TM0", "TM1",
    "TM2", "TM3", "TS0", "TS1", "TS2", "TS3",
    "TS4", "TS5", "TS6", "TIC", "TLC", "TMC",
    "TMP", "TITC", "TGHC", "TAC", "TGHC2", "TCJ",
    "TMBJ", "TCF", "TCL", "TRF", "TRF2", "TEL",
    "TAP", "TSP", "TMZP", "TCRP", "TBP", "TLP",
    "TWP", "TAS", "TMG", "TWW", "TSB", "TVL",
    "TCT", "TEF", "TAL", "TSQ", "THT", "TCB",
    "TDM", "TSD", "TGS", "TUS", "TH1", "TBC",
    "TH2", "TPM", "TSC", "TG1", "TWF", "TSH0",
    "TSH1", "TSH2", "TSH3", "TSH4", "TSH5", "TG2",
    "TG3", "TG4", "TG5", "TG6", "TG7", "TG8",
    "TG9", "TG10", "TG11", "TG12", "TG13", "TG14",
    "TT1", "TDF", "TSH", "THRS", "TSTD", "TRMS",
    "TRWS", "TRC", "TQF", "TES1", "TEN", "TERS",
    "TERB", "TEP", "TST1", "TST2", "TMS1", "TAS1",
    "TAS2", "TAS3", "TST3", "TST4", "TST5", "TAS4",
    "TCY", "TBW", "TBR1", "TBR2", "TML", "TMW",
    "TBR3", "TBR4", "TMJ", "TBR", "TMO1", "TMO2",
    "TMO3", "TMO4", "TMO5", "TWH1", "TWH2", "TNS",
    "TP1", "TP2", "TK1", "TK2", "TR1", "TR2",
    "TQ1", "TQ2", "TWN", "TCE", "TCO", "THL",
    "TCC", "TB1", "TB2", "TK3", "TK4", "TBN",
    "TBN1", "TDT1", "TDT2", "TDT3", "TMM1", "TMM2",
    "TMM3", "TGS1", "TGS2", "TGS3", "TGS4", "TDN4",
    "TDN5", "TJT1", "TJT2", "TJB1", "TTF", "TF1",
    "TF2", "TGE1", "TJT3", "TJT4", "TJP1", "TJB2",
    "TGE2", "TJT5", "TJB3", "TJB4", "TJT6", "TJP2",
    "TGE3", "TCK", "TGE4", "TGE5", "TG15", "TG16",
    "TG17", "TG18", "TG19", "TG20", "TG21", "TSM",
    "TIG", "TCFS", "TRFS", "TRF3", "TNSS", "TCT1",
    "TCT2", "TSF1", "TSF2", "TSF3", "TCN", "TTG",
    "TSNC", "TSNB", "TSCP", "TCD", "TSG", "TSK",
    "TGH1", "TGH2", "TSMP", "TJF", "TLY", "TGC1",
    "TGC2", "TGG", "TSPH", "TOH1", "TOH2", "TOT1",
    "TOT2", "TOS", "TOT3", "TOT4", "TSC2", "TSP1",
    "TOH3", "TSP2", "ROMROOF1", "GEOROOF1", "TNTROOF1", "JNGROOF1",
    "MINROOF1", "ROMROOF2", "GEOROOF2", "PAGROOF1", "SPCROOF1", "ROOF1",
    "ROOF2", "ROOF3", "ROOF4", "ROOF5", "ROOF6", "ROOF7",
    "ROOF8", "ROOF9", "ROOF10", "ROOF11", "ROOF12", "ROOF13",
    "ROOF14", "IGROOF", "CORROOF", "CORROOF2",
];

const LARGE_SCENERY_OBJECTS: [&str; 39] = [
    "SCOL", "SHS1", "SSPX", "SHS2", "SCLN", "SMH1",
    "SMH2", "SVLC", "SPYR", "SMN1", "SMB", "SSK1",
    "SDN1", "SDN2", "SDN3", "SIP", "STB1", "STB2",
    "STG1", "STG2", "SCT", "SOH1", "SOH2", "SOH3",
    "SGP", "SSR", "STH", "SAH", "SPS", "SPG",
    "SOB", "SAH2", "SST", "SSH", "SAH3", "SSIG1",
    "SSIG2", "SSIG3", "SSIG4",
];

const WALL_OBJECTS: [&str; 96] = [
    "WMF", "WMFG", "WRW", "WEW", "WHG", "WHGG",
    "WCW1", "WCW2", "WSW", "WSWG", "WMW", "WALLGL16",
    "WFW1", "WFWG", "WPW1", "WPW2", "WPF", "WPFG",
    "WWTW", "WMWW", "WSW1", "WSW2", "WGW2", "WBW",
    "WBR1", "WBRG", "WFW1", "WFW1", "WBR2", "WBR3",
    "WPW3", "WJF", "WCH", "WCHG", "WC1", "WC2",
    "WC3", "WC4", "WC5", "WC6", "WC7", "WC8",
    "WC9", "WC10", "WC11", "WC12", "WC13", "WC14",
    "WC15", "WC16", "WC17", "WC18", "WALLBRDR", "WALLBR32",
    "WALLBR16", "WALLBR8", "WALLCF8", "WALLCF16", "WALLCF32", "WALLBB8",
    "WALLBB16", "WALLBB32", "WALLRS8", "WALLRS16", "WALLRS32", "WALLCB8",
    "WALLCB16", "WALLCB32", "WALLGL8", "WALLGL32", "WALLWD8", "WALLWD16",
    "WALLWD32", "WALLTN32", "WALLJN32", "WALLMN32", "WALLSP32", "WALLPG32",
    "WALLU132", "WALLU232", "WALLCZ32", "WALLCW32", "WALLCY32", "WALLCX32",
    "WBR1A", "WBR2A", "WRWA", "WWTWA", "WALLIG16", "WALLIG24",
    "WALLCO16", "WALLCFDR", "WALLCBDR", "WALLBRWN", "WALLCFWN", "WALLCBWN",
];

const PATH_OBJECTS: [&str; 24] = [
    "TARMAC", "PATHSPCE", "PATHDIRT", "TARMACG", "TARMAC", "PATHSPCE",
    "TARMACB", "TARMACG", "PATHDIRT", "PATHASH", "", "",
    "PATHCRZY", "", "", "", "ROAD", "",
    "", "", "PATHCRZY", "PATHCRZY", "PATHCRZY", "PATHCRZY",
];

const PATH_ADDITION_OBJECTS: [&str; 15] = [
    "", "LAMP1", "LAMP2", "LITTER1", "BENCH1", "JUMPFNT1",
    "LAMP3", "LAMP4", "LAMP1", "LAMP2", "LITTER1", "BENCH1",
    "LAMP3", "LAMP4", "JUMPSNW1",
];

const SCENERY_GROUP_OBJECTS: [&str; 18] = [
    "", "SCGMINE", "SCGCLASS", "SCGEGYPT", "SCGMART", "",
    "SCGWOND", "SCGJURAS", "SCGSPOOK", "SCGJUNGL", "SCGABSTR", "",
    "SCGSNOW", "SCGMEDIE", "SCGSPACE", "SCGHALLO", "SCGURBAN", "SCGORIEN",
];

const WATER_OBJECTS: [&str; 2] = [
    "WTRCYAN", "WTRORNG",
];

const PREFERRED_RIDE_ENTRIES: [&[&str]; 91] = [
    &["SPDRCR"],
    &["TOGST"],
    &["ARRSW1", "VEKVAMP", "ARRSW2"],
    &["NEMT"],
    &["ZLDB", "ZLOG"],
    &["NRL", "NRL2", "AML1", "TRAM1"],
    &["MONO1", "MONO2", "MONO3"],
    &["BATFL", "SKYTR"],
    &["RBOAT", "BBOAT", "CBOAT", "SWANS", "TRIKE", "JSKI"],
    &["WMOUSE", "WMMINE"],
    &["STEEP1", "STEEP2", "SBOX"],
    &["SPCAR", "RCR", "TRUCK1", "VCR", "CTCAR"],
    &["SSC1"],
    &["BOB1", "INTBOB"],
    &["OBS1", "OBS2"],
    &["SCHT1"],
    &["DING1"],
    &["AMT1"],
    &["CLIFT1", "CLIFT2"],
    &["ARRT1", "ARRT2"],
    &[],
    &[],
    &["KART1"],
    &["LFB1"],
    &["RAPBOAT"],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
    &["REVF1"],
    &["LIFT1"],
    &["BMVD"],
    &[],
    &[],
    &[],
    &[],
    &[],
    &["GTC", "HMCAR"],
    &["BMSD", "BMSU", "BMFL", "BMRB", "GOLTR"],
    &["PTCT1", "MFT", "PTCT2"],
    &["SFRIC1"],
    &["SMC1", "SMC2", "WMSPIN"],
    &["ARRX"],
    &[],
    &["BMAIR"],
    &[],
    &["VREEL"],
    &["SPBOAT"],
    &["HELICAR"],
    &["VEKST"],
    &["SMONO"],
    &[],
    &["REVCAR"],
    &["UTCAR", "UTCARR"],
    &[],
    &["INTST"],
    &["GDROP1"],
    &[],
    &[],
    &["MONBK"],
    &["SLCT", "SLCFO", "VEKDV"],
    &["CSTBOAT"],
    &["THCAR"],
    &["IVMC1"],
    &[],
    &["SUBMAR"],
    &["RFTBOAT"],
    &[],
    &[],
    &[],
    &[],
    &[],
    &[],
    &["INTINV"],
    &["WCATC", "RCKC", "JSTAR1"],
    &["PMT1"],
    &[],
    &["PREMT1"],
];

const SCENERY_THEME_OBJECTS: [&[&str]; 18] = [
    &[
        "TIC", "TLC", "TMC", "TMP", "TITC", "TGHC", "TAC", "TGHC2",
        "TCJ", "TMBJ", "TCF", "TCL", "TRF", "TRF2", "TEL", "TAP",
        "TSP", "TMZP", "TCRP", "TBP", "TLP", "TWP", "TAS", "TMG",
        "TWW", "TSB", "TVL", "TCY", "TNS", "TWN", "TCE", "TCO",
        "THL", "TCC", "TF1", "TF2", "TCT", "TH1", "TH2", "TPM",
        "TROPT1", "TS0", "TS1", "TS2", "TS3", "TS4", "TS5", "TS6",
        "TEF", "TAL", "TSQ", "THT", "TCB", "TDM", "TSD", "TORN1",
        "TORN2", "TGS", "TUS", "TBC", "TSC", "TWF", "TSH0", "TSH1",
        "TSH2", "TSH3", "TSH4", "TSH5", "TDF", "TSH", "THRS", "TSTD",
        "TBR", "TTF", "WHG", "WHGG", "WCH", "WCHG", "TG1", "TG2",
        "TG3", "TG4", "TG5", "TG6", "TG7", "TG8", "TG9", "TG10",
        "TG11", "TG12", "TG13", "TG14", "TG15", "TG16", "TG17", "TG18",
        "TG19", "TG20", "TG21", "WBR1A", "WBR2A", "WALLBB34", "WALLTN32", "TNTROOF1",
        "WALLBB33", "WALLBB32", "WALLBB16", "WALLBB8", "ROOF5", "ROOF7", "WALLRS32", "WALLRS16",
        "WALLRS8", "WALLBR32", "WALLBR16", "WALLBR8", "WALLBRDR", "WALLBRWN", "BRBASE", "ROOF1",
        "ROOF2", "ROOF3", "ROOF4", "WALLCB32", "WALLCB16", "WALLCB8", "WALLCBDR", "WALLCBWN",
        "BRBASE2", "CWBCRV33", "CWBCRV32", "BRCRRF1", "ROOF6", "ROOF8", "WALLCF32", "WALLCF16",
        "WALLCF8", "WALLCFDR", "WALLCFWN", "WALLCFAR", "BRBASE3", "CWFCRV33", "CWFCRV32", "BRCRRF2",
        "ROOF9", "ROOF11", "ROOF10", "ROOF12", "CORROOF2", "WALLCO16", "CORROOF", "WALLLT32",
        "WALLSK16", "WALLSK32", "SKTDW2", "SKTDW", "SKTBASE", "SKTBASET", "SUPPW2", "SUPPW1",
        "SUPPW3", "SUPPLEG1", "SUPPLEG2", "SUMRF", "WALLRH32", "WMF", "WMFG", "WSW",
        "WSWG", "WFW1", "WFWG", "WPF", "WPFG", "WSW1", "WSW2", "WBR1",
        "WBRG", "WBR2", "WBR3", "WALLMM16", "WALLMM17", "LAMP1", "LAMP2", "LITTER1",
        "BENCH1", "QTV1", "BN1", "WALLPOST", "WALLSIGN", "SSIG1", "SSIG2", "SSIG3",
        "SSIG4",
    ],
    &[
        "SMH1", "SMH2", "SMN1", "TBW", "TBR1", "TBR2", "TML", "TMW",
        "TBR3", "TBR4", "TMJ", "BN5", "WALLWD8", "WALLWD16", "WALLWD32", "WALLWD33",
        "WALLMN32", "WDBASE", "MINROOF1", "ROOF13", "LITTERMN",
    ],
    &[
        "SCOL", "TT1", "TRMS", "TRWS", "TRC", "TQF", "WRW", "WRWA",
        "ROMROOF2", "WC3", "ROMROOF1", "BN3",
    ],
    &[
        "SSPX", "SCLN", "SPYR", "TES1", "TEN", "TERS", "TERB", "TEP",
        "WEW", "LAMP3", "BN4", "BENCHSTN",
    ],
    &["SMB", "TMO1", "TMO2", "TMO3", "TMO4", "TMO5", "SVLC", "WMW", "LAMP4"],
    &["JUMPFNT1"],
    &[
        "TWH1", "TWH2", "TST1", "TST2", "TMS1", "TST3", "TST4", "TST5",
        "TAS1", "TAS2", "TAS3", "TAS4", "CHBBASE", "TP1", "TP2", "TK1",
        "TK2", "TR1", "TR2", "TQ1", "TQ2", "TB1", "TB2", "TK3",
        "TK4", "WCW1", "WCW2",
    ],
    &[
        "TBN", "TBN1", "TDN4", "TDN5", "SDN1", "SDN2", "SDN3", "WWTW",
        "WMWW", "WWTWA", "WBW", "BN6",
    ],
    &[
        "SSK1", "TDT1", "TDT2", "TDT3", "TMM1", "TMM2", "TMM3", "TGS1",
        "TGS2", "TGS3", "TGS4", "SMSKULL", "WALLRK32",
    ],
    &[
        "TJT1", "TJT2", "TJB1", "TJT3", "TJT4", "TJP1", "TJB2", "TJT5",
        "TJB3", "TJB4", "TJT6", "TJP2", "TJF", "WPW1", "WPW2", "WJF",
        "BN2", "WALLJN32", "JNGROOF1", "ROOF14", "BENCHLOG",
    ],
    &[
        "TGE1", "TGE2", "TGE3", "TGE4", "TGE5", "TGC1", "TGC2", "WALLGL8",
        "WALLGL16", "WALLGL32", "GEOROOF1", "WGW2", "GEOROOF2",
    ],
    &["TCK"],
    &[
        "SIP", "TSM", "TIG", "TSF1", "TSF2", "TSF3", "TSNC", "TSNB",
        "WC16", "WC17", "WC18", "JUMPSNW1", "TCFS", "TRFS", "TRF3", "TNSS",
        "BN8", "WALLIG16", "WALLIG24", "IGROOF",
    ],
    &[
        "TCT1", "STB1", "STB2", "WC1", "WC4", "WC5", "WC6", "WC7",
        "WC8", "WALLCZ32", "WALLCY32", "TCT2", "STG1", "STG2", "WC2", "WC9",
        "WC10", "WC11", "WC12", "WC13", "WALLCW32", "WALLCX32", "TCN", "TTG",
        "SCT", "SOH1", "SOH2", "SOH3", "WPW3", "WALLCFPC", "WALLCBPC",
    ],
    &[
        "SSR", "SST", "SSH", "TSCP", "TSPH", "TSC2", "TSP1", "TSP2",
        "WALLSP32", "SPCROOF1", "BN9", "BENCHSPC", "LITTERSP",
    ],
    &[
        "TCD", "TSG", "TSK", "TGH1", "TGH2", "TSMP", "SGP", "WC14",
        "WC15", "TL0", "TL1", "TL2", "TL3", "TM0", "TM1", "TM2",
        "TM3",
    ],
    &["SHS1", "SHS2", "STH", "SAH", "SPS", "SAH2", "SAH3", "SOB", "WALLU132", "WALLU232"],
    &[
        "SPG", "TLY", "TGG", "TOH1", "TOH2", "TOT1", "TOT2", "TOS",
        "TOT3", "TOT4", "TOH3", "WALLPG32", "PAGROOF1", "BN7",
    ],
];

const RIDE_TYPES: [u8; 85] = [
    52, 1, 2, 3, 4, 5, 6, 7, 8, 9,
    10, 11, 12, 13, 14, 15, 16, 17, 18, 19,
    20, 21, 22, 23, 24, 25, 26, 27, 28, 28,
    30, 28, 32, 33, 32, 35, 36, 37, 38, 39,
    40, 41, 42, 32, 44, 28, 46, 47, 28, 49,
    50, 51, 52, 53, 54, 28, 28, 32, 28, 59,
    60, 61, 62, 63, 255, 65, 66, 67, 255, 69,
    70, 71, 72, 73, 74, 75, 76, 8, 32, 79,
    28, 81, 30, 28, 30,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colour_full_domain() {
        let mut seen = [false; 32];
        for legacy in 0..32u8 {
            let c = colour(legacy);
            assert!(c < 32);
            seen[c as usize] = true;
        }
        // The legacy palette is a permutation of the modern one.
        assert!(seen.iter().all(|s| *s));
        assert_eq!(colour(32), colour::BLACK);
        assert_eq!(colour(255), colour::BLACK);
        assert_eq!(colour(31), colour::ICY_BLUE);
    }

    #[test]
    fn test_terrain_full_domain() {
        for legacy in 0..16u8 {
            assert!(terrain(legacy).is_some_and(|t| t <= 11));
            assert!(terrain_edge(legacy).is_some_and(|t| t <= 3));
        }
        assert_eq!(terrain(16), None);
        assert_eq!(terrain_edge(16), None);
        assert_eq!(terrain(7), Some(2));
        assert_eq!(terrain_edge(8), Some(3));
    }

    #[test]
    fn test_ride_type_full_domain() {
        let mut nulls = Vec::new();
        for legacy in 0..ride::COUNT as u8 {
            match ride_type(legacy) {
                Some(t) => assert!((t as usize) < modern_ride::COUNT),
                None => nulls.push(legacy),
            }
        }
        assert_eq!(nulls, vec![ride::UNUSED_40, ride::UNUSED_44]);
        assert_eq!(ride_type(ride::COUNT as u8), None);
        assert_eq!(ride_type(0), Some(52));
        assert_eq!(ride_type(ride::HEDGE_MAZE), Some(modern_ride::MAZE));
        assert_eq!(ride_type(ride::BALLOON_STALL), Some(32));
    }

    #[test]
    fn test_ride_type_uses_vehicles() {
        let without: Vec<u8> = (0..ride::COUNT as u8)
            .filter(|t| !ride_type_uses_vehicles(*t))
            .collect();
        assert_eq!(without.len(), 24);
        assert!(without.contains(&ride::HEDGE_MAZE));
        assert!(without.contains(&ride::LEMONADE_STALL));
        assert!(ride_type_uses_vehicles(0));
        assert!(ride_type_uses_vehicles(ride::MERRY_GO_ROUND));
    }

    #[test]
    fn test_ride_objects_full_domain() {
        for legacy in 0..ride::COUNT as u8 {
            let object = ride_type_object(legacy);
            let unused = legacy == ride::UNUSED_40 || legacy == ride::UNUSED_44;
            assert_eq!(object.is_none(), unused, "ride type {}", legacy);
            assert!(object.is_none_or(|o| o.len() <= 8));
        }
        assert_eq!(ride_type_object(ride::HEDGE_MAZE), Some("HMAZE"));
        assert_eq!(ride_type_object(85), None);
    }

    #[test]
    fn test_vehicle_objects_full_domain() {
        for legacy in 0..VEHICLE_TYPE_COUNT as u8 {
            assert!(vehicle_object(legacy).is_some_and(|o| o.len() <= 8));
        }
        assert_eq!(vehicle_object(0), Some("SCHT1"));
        assert_eq!(vehicle_object(VEHICLE_TYPE_COUNT as u8), None);
    }

    #[test]
    fn test_scenery_objects_full_domain() {
        for legacy in 0..=u8::MAX {
            let lookups: [fn(u8) -> Option<&'static str>; 5] = [
                small_scenery_object,
                large_scenery_object,
                wall_object,
                path_addition_object,
                path_object,
            ];
            for lookup in lookups {
                assert!(lookup(legacy).is_none_or(|o| !o.is_empty() && o.len() <= 8));
            }
        }
        assert_eq!(small_scenery_object(0), Some("TL0"));
        assert_eq!(small_scenery_object(243), Some("CORROOF2"));
        assert_eq!(small_scenery_object(244), None);
        assert_eq!(large_scenery_object(38), Some("SSIG4"));
        assert_eq!(wall_object(wall::WOODEN_PANEL_FENCE), Some("WFW1"));
        assert_eq!(wall_object(96), None);
        assert_eq!(path_object(10), None);
        assert_eq!(path_object(16), Some("ROAD"));
        assert_eq!(path_addition_object(path_addition::NONE), None);
        assert_eq!(path_addition_object(path_addition::JUMPING_SNOW), Some("JUMPSNW1"));
        assert_eq!(water_object(1), Some("WTRORNG"));
        assert_eq!(water_object(2), None);
    }

    #[test]
    fn test_scenery_groups_and_themes() {
        assert_eq!(scenery_theme_count(), 18);
        let groupless: Vec<u8> = (0..18u8)
            .filter(|t| scenery_group_object(*t).is_none())
            .collect();
        // General, jumping fountains and garden clock
        assert_eq!(groupless, vec![0, 5, 11]);
        for theme in 0..18u8 {
            assert!(!scenery_theme_objects(theme).is_empty());
        }
        assert_eq!(scenery_theme_objects(5), &["JUMPFNT1"]);
        assert!(scenery_theme_objects(18).is_empty());
    }

    #[test]
    fn test_preferred_ride_entries() {
        assert_eq!(preferred_ride_entries(0), &["SPDRCR"]);
        assert!(preferred_ride_entries(modern_ride::MAZE).is_empty());
        assert_eq!(preferred_ride_entries(52), &["PTCT1", "MFT", "PTCT2"]);
        assert!(preferred_ride_entries(modern_ride::COUNT as u8).is_empty());
    }

    #[test]
    fn test_path_queue_and_additions() {
        let queues: Vec<u8> = (0..24u8).filter(|p| path_is_queue(*p)).collect();
        assert_eq!(queues, vec![0, 1, 2, 3]);

        for legacy in 0..15u8 {
            let normal = normalise_path_addition(legacy);
            assert!(normal <= path_addition::LAMP_4 || normal == path_addition::JUMPING_SNOW);
            assert_eq!(
                path_addition_object(legacy),
                path_addition_object(normal),
                "addition {}",
                legacy
            );
        }
        assert_eq!(normalise_path_addition(path_addition::BROKEN_BIN), path_addition::BIN);
        assert_eq!(normalise_path_addition(200), 200);
    }

    #[test]
    fn test_colour_scheme_copy_exceptions() {
        let exceptions: Vec<u8> = (0..VEHICLE_TYPE_COUNT as u8)
            .filter(|v| {
                colour_scheme_copy(*v)
                    != ColourCopyDescriptor::new(
                        ColourSource::Primary,
                        ColourSource::Secondary,
                        ColourSource::Fixed(colour::BLACK),
                    )
            })
            .collect();
        assert_eq!(exceptions, vec![4, 6, 10, 14, 36, 60]);
        assert_eq!(colour_scheme_copy(6).apply(5, 9), [5, 5, 9]);
        assert_eq!(colour_scheme_copy(0).apply(5, 9), [5, 9, colour::BLACK]);
    }

    #[test]
    fn test_convert_wall() {
        let colours = [colour::YELLOW, colour::TEAL, colour::BLACK];
        assert_eq!(
            convert_wall(wall::WHITE_WOODEN_PANEL_FENCE, colours),
            (wall::WOODEN_PANEL_FENCE, [colour::WHITE, colour::TEAL, colour::BLACK])
        );
        assert_eq!(
            convert_wall(wall::WOODEN_PANEL_FENCE_WITH_GATE, colours),
            (
                wall::WOODEN_PANEL_FENCE_WITH_GATE,
                [colour::DARK_BROWN, colour::YELLOW, colour::BLACK]
            )
        );
        assert_eq!(
            convert_wall(wall::GLASS_PANELS, colours).1,
            [colour::YELLOW, colour::WHITE, colour::BLACK]
        );
        assert_eq!(convert_wall(wall::MEDIUM_GREY_CASTLE, colours).1[0], colour::GREY);
        assert_eq!(convert_wall(0, colours), (0, colours));
    }
}
