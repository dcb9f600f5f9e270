//! Byte offsets inside a decoded legacy park image.
//!
//! The image is the 0x1F850C-byte block the first game saves: date and
//! random state, the tile element pool, sprites, then park and finance
//! state, research lists, banners, user strings, ride records and finally
//! climate, news and scenario fields. Offsets are shared by the reader and
//! [`LegacyParkBuilder`](super::LegacyParkBuilder).

/// Size of a decoded image. Anything else is not a legacy park.
pub const IMAGE_SIZE: usize = 0x1F850C;

pub mod header {
    pub const MONTH: usize = 0x000000;
    pub const DAY: usize = 0x000002;
    pub const TICKS: usize = 0x000004;
    pub const RANDOM_A: usize = 0x000008;
    pub const RANDOM_B: usize = 0x00000C;

    /// User string id, stored as `u32`.
    pub const PARK_NAME_STRING: usize = 0x19882C;
    pub const CASH: usize = 0x198834;
    pub const LOAN: usize = 0x198838;
    pub const PARK_FLAGS: usize = 0x19883C;
    pub const ENTRANCE_FEE: usize = 0x198840;
    pub const RESEARCH_LEVEL: usize = 0x198857;

    pub const HANDYMAN_COLOUR: usize = 0x199025;
    pub const MECHANIC_COLOUR: usize = 0x199026;
    pub const SECURITY_COLOUR: usize = 0x199027;
    pub const PARK_RATING: usize = 0x199108;

    pub const RESEARCH_PRIORITY: usize = 0x19914A;
    pub const RESEARCH_PROGRESS_STAGE: usize = 0x19914B;
    pub const LAST_RESEARCH_ITEM: usize = 0x19914C;
    pub const LAST_RESEARCH_TYPE: usize = 0x19914E;
    pub const NEXT_RESEARCH_ITEM: usize = 0x199538;
    pub const NEXT_RESEARCH_TYPE: usize = 0x19953A;
    pub const RESEARCH_PROGRESS: usize = 0x19953C;
    pub const NEXT_RESEARCH_EXPECTED_DAY: usize = 0x19953F;
    pub const NEXT_RESEARCH_EXPECTED_MONTH: usize = 0x199540;

    pub const GUEST_INITIAL_HAPPINESS: usize = 0x199541;
    pub const PARK_SIZE: usize = 0x199542;
    pub const GUEST_GENERATION_PROBABILITY: usize = 0x199544;
    pub const TOTAL_RIDE_VALUE_FOR_MONEY: usize = 0x199546;
    pub const MAX_LOAN: usize = 0x199548;
    pub const GUEST_INITIAL_CASH: usize = 0x19954C;
    pub const GUEST_INITIAL_HUNGER: usize = 0x19954E;
    pub const GUEST_INITIAL_THIRST: usize = 0x19954F;

    pub const OBJECTIVE_TYPE: usize = 0x199550;
    pub const OBJECTIVE_YEARS: usize = 0x199551;
    pub const OBJECTIVE_CURRENCY: usize = 0x199554;
    pub const OBJECTIVE_NUM_GUESTS: usize = 0x199558;

    pub const TOTAL_EXPENDITURE: usize = 0x199784;
    pub const PROFIT: usize = 0x199788;
    pub const PARK_VALUE: usize = 0x199994;
    pub const COMPLETED_COMPANY_VALUE: usize = 0x199B98;
    pub const NUM_ADMISSIONS: usize = 0x199B9C;
    pub const ADMISSION_INCOME: usize = 0x199BA0;
    pub const COMPANY_VALUE: usize = 0x199BA4;
    pub const LAND_PRICE: usize = 0x199BC8;
    pub const CONSTRUCTION_RIGHTS_PRICE: usize = 0x199BCA;

    pub const GAME_VERSION: usize = 0x199C14;
    pub const MAP_SIZE: usize = 0x199C8C;
    pub const WATER_COLOUR: usize = 0x199C99;

    pub const VIEW_X: usize = 0x1C9642;
    pub const VIEW_Y: usize = 0x1C9644;
    pub const VIEW_ZOOM: usize = 0x1C9646;
    pub const VIEW_ROTATION: usize = 0x1C9647;

    pub const CLIMATE: usize = 0x1F432A;
    pub const CLIMATE_TIMER: usize = 0x1F432C;
    pub const WEATHER: usize = 0x1F432E;
    pub const TARGET_WEATHER: usize = 0x1F432F;
    pub const TEMPERATURE: usize = 0x1F4330;
    pub const TARGET_TEMPERATURE: usize = 0x1F4331;
    pub const WEATHER_GLOOM: usize = 0x1F4334;
    pub const TARGET_WEATHER_GLOOM: usize = 0x1F4335;
    pub const RAIN: usize = 0x1F4336;
    pub const TARGET_RAIN: usize = 0x1F4337;

    pub const SCENARIO_NAME: usize = 0x1F8314;
    pub const SCENARIO_NAME_LEN: usize = 62;
    pub const SCENARIO_SLOT_INDEX: usize = 0x1F8352;
    pub const SCENARIO_FLAGS: usize = 0x1F8354;
}

/// Guest spawn points: `{x: u16, y: u16, z: u8, direction: u8}`.
pub mod peep_spawn {
    pub const OFFSET: usize = 0x19884A;
    pub const SIZE: usize = 6;
    pub const COUNT: usize = 2;
    pub const X: usize = 0;
    pub const Y: usize = 2;
    pub const Z: usize = 4;
    pub const DIRECTION: usize = 5;
    /// Stored in `x` for an unused spawn.
    pub const UNDEFINED: u16 = 0xFFFF;
}

pub mod history {
    /// `i32` per month and expenditure type, month-major.
    pub const EXPENDITURE: usize = 0x198CA0;
    pub const EXPENDITURE_MONTHS: usize = 16;
    pub const EXPENDITURE_TYPES: usize = 14;
    pub const PARK_RATING: usize = 0x19910A;
    pub const GUESTS: usize = 0x19912A;
    pub const SHORT_LEN: usize = 32;
    pub const MARKETING_STATUS: usize = 0x19955A;
    pub const MARKETING_ASSOC: usize = 0x19956E;
    pub const MARKETING_LEN: usize = 20;
    pub const CASH: usize = 0x199584;
    pub const WEEKLY_PROFIT: usize = 0x199794;
    pub const PARK_VALUE: usize = 0x199998;
    /// Entries in each `i32` finance history.
    pub const FINANCE_LEN: usize = 128;
}

/// Research items: `{item, related_ride, type, flags, category}`.
pub mod research {
    pub const ITEMS: usize = 0x199150;
    pub const ITEMS_COUNT: usize = 200;
    /// Loopy Landscapes keeps its list elsewhere.
    pub const ITEMS_LL: usize = 0x199C9C;
    pub const ITEMS_LL_COUNT: usize = 180;
    pub const ITEM_SIZE: usize = 5;

    pub const ITEM: usize = 0;
    pub const RELATED_RIDE: usize = 1;
    pub const TYPE: usize = 2;
    pub const FLAGS: usize = 3;
    pub const CATEGORY: usize = 4;

    /// `flags` value marking a separator; `item` then says which one.
    pub const FLAGS_SEPARATOR: u8 = 0xFF;
    pub const END_AVAILABLE: u8 = 0xFF;
    pub const END_RESEARCHABLE: u8 = 0xFE;
    pub const END: u8 = 0xFD;

    pub const TYPE_THEME: u8 = 0;
    pub const TYPE_RIDE: u8 = 1;
    pub const TYPE_VEHICLE: u8 = 2;
    pub const TYPE_SPECIAL: u8 = 3;

    /// Bits of the research priority byte.
    pub const CATEGORY_ROLLERCOASTERS: u8 = 1 << 0;
    pub const CATEGORY_THRILL_RIDES: u8 = 1 << 1;
    pub const CATEGORY_GENTLE_TRANSPORT_RIDES: u8 = 1 << 2;
    pub const CATEGORY_SHOPS: u8 = 1 << 3;
    pub const CATEGORY_SCENERY_THEMING: u8 = 1 << 4;
}

pub mod strings {
    pub const TABLE: usize = 0x19B89C;
    pub const COUNT: usize = 1024;
    pub const LEN: usize = 32;
    /// String ids in `USER_START..USER_END` refer to the table.
    pub const USER_START: u16 = 0x8000;
    pub const USER_END: u16 = 0x9000;
}

/// Banners: `{type, flags, string_idx: u16, colour, text_colour, x, y}`.
pub mod banner {
    pub const OFFSET: usize = 0x19B57C;
    pub const SIZE: usize = 8;
    pub const COUNT: usize = 100;
    pub const TYPE: usize = 0;
    pub const FLAGS: usize = 1;
    pub const STRING_IDX: usize = 2;
    pub const COLOUR: usize = 4;
    pub const TEXT_COLOUR: usize = 5;
    pub const X: usize = 6;
    pub const Y: usize = 7;
    /// Banner type of an unused slot.
    pub const NULL: u8 = 0xFF;
}

/// Ride records, 0x260 bytes each.
pub mod ride {
    pub const OFFSET: usize = 0x1A38A0;
    pub const SIZE: usize = 0x260;
    pub const COUNT: usize = 255;

    /// `TYPE` of an empty slot.
    pub const TYPE_NULL: u8 = 255;
    /// Coordinate pair meaning "no location".
    pub const XY_UNDEFINED: u16 = 0xFFFF;
    /// `VALUE` of a ride that has not been rated.
    pub const VALUE_UNDEFINED: u16 = 0xFFFF;

    pub const STATIONS: usize = 4;
    pub const TRAINS: usize = 12;
    pub const COLOUR_SCHEMES: usize = 4;

    pub const TYPE: usize = 0x000;
    pub const VEHICLE_TYPE: usize = 0x001;
    pub const LIFECYCLE_FLAGS: usize = 0x002;
    pub const OPERATING_MODE: usize = 0x004;
    pub const COLOUR_SCHEME: usize = 0x005;
    /// `{body, trim}` per train.
    pub const VEHICLE_COLOURS: usize = 0x006;
    pub const TRACK_PRIMARY_COLOUR: usize = 0x01E;
    pub const TRACK_SECONDARY_COLOUR: usize = 0x01F;
    pub const TRACK_SUPPORT_COLOUR: usize = 0x020;
    pub const STATUS: usize = 0x021;
    pub const NAME: usize = 0x022;
    pub const OVERALL_VIEW: usize = 0x028;
    pub const STATION_STARTS: usize = 0x02A;
    pub const STATION_HEIGHT: usize = 0x032;
    pub const STATION_LENGTH: usize = 0x036;
    pub const STATION_LIGHT: usize = 0x03A;
    pub const STATION_DEPART: usize = 0x03E;
    pub const ENTRANCE: usize = 0x042;
    pub const EXIT: usize = 0x04A;
    pub const LAST_PEEP_IN_QUEUE: usize = 0x052;
    pub const NUM_PEEPS_IN_QUEUE: usize = 0x05A;
    pub const DEPART_FLAGS: usize = 0x076;
    pub const NUM_STATIONS: usize = 0x077;
    pub const NUM_TRAINS: usize = 0x078;
    pub const NUM_CARS_PER_TRAIN: usize = 0x079;
    pub const MAX_TRAINS: usize = 0x07C;
    pub const MIN_WAITING_TIME: usize = 0x07E;
    pub const MAX_WAITING_TIME: usize = 0x07F;
    pub const OPERATION_OPTION: usize = 0x080;
    pub const BOAT_HIRE_RETURN_DIRECTION: usize = 0x081;
    pub const BOAT_HIRE_RETURN_POSITION: usize = 0x082;
    pub const SPECIAL_TRACK_ELEMENTS: usize = 0x085;
    pub const MAX_SPEED: usize = 0x088;
    pub const AVERAGE_SPEED: usize = 0x08C;
    pub const LENGTH: usize = 0x094;
    pub const TIME: usize = 0x0A4;
    pub const TESTING_FLAGS: usize = 0x0B8;
    pub const NUM_INVERSIONS: usize = 0x0C4;
    pub const NUM_DROPS: usize = 0x0C5;
    pub const START_DROP_HEIGHT: usize = 0x0C6;
    pub const HIGHEST_DROP_HEIGHT: usize = 0x0C7;
    pub const SHELTERED_LENGTH: usize = 0x0C8;
    pub const NUM_SHELTERED_SECTIONS: usize = 0x0CE;
    pub const CUR_TEST_TRACK_Z: usize = 0x0CF;
    pub const PRICE: usize = 0x0E8;
    pub const BULLWHEEL_Z: usize = 0x0EE;
    pub const EXCITEMENT: usize = 0x0F0;
    pub const INTENSITY: usize = 0x0F2;
    pub const NAUSEA: usize = 0x0F4;
    pub const VALUE: usize = 0x0F6;
    pub const SATISFACTION: usize = 0x0FA;
    pub const TOTAL_CUSTOMERS: usize = 0x100;
    pub const TOTAL_PROFIT: usize = 0x104;
    pub const POPULARITY: usize = 0x108;
    pub const NUM_RIDERS: usize = 0x10B;
    pub const SLIDE_PEEP_T_SHIRT_COLOUR: usize = 0x11E;
    pub const BUILD_DATE: usize = 0x130;
    pub const UPKEEP_COST: usize = 0x131;
    pub const BREAKDOWN_REASON_PENDING: usize = 0x13C;
    pub const MECHANIC_STATUS: usize = 0x13D;
    pub const INSPECTION_STATION: usize = 0x140;
    pub const BREAKDOWN_REASON: usize = 0x143;
    pub const RELIABILITY: usize = 0x146;
    pub const UNRELIABILITY_FACTOR: usize = 0x148;
    pub const DOWNTIME: usize = 0x149;
    pub const INSPECTION_INTERVAL: usize = 0x14A;
    pub const LAST_INSPECTION: usize = 0x14B;
    pub const INCOME_PER_HOUR: usize = 0x160;
    pub const PROFIT: usize = 0x164;
    pub const QUEUE_TIME: usize = 0x168;
    pub const TRACK_COLOUR_MAIN: usize = 0x16C;
    pub const TRACK_COLOUR_ADDITIONAL: usize = 0x170;
    pub const TRACK_COLOUR_SUPPORTS: usize = 0x174;
    pub const MUSIC: usize = 0x178;
    pub const ENTRANCE_STYLE: usize = 0x179;

    pub const LIFECYCLE_MUSIC: u16 = 1 << 13;
    pub const LIFECYCLE_INDESTRUCTIBLE: u16 = 1 << 14;
    pub const LIFECYCLE_INDESTRUCTIBLE_TRACK: u16 = 1 << 15;

    /// Depart flag the first game reused as "play music".
    pub const DEPART_PLAY_MUSIC: u8 = 1 << 5;

    pub const MODE_POWERED_LAUNCH: u8 = 3;
}

/// Tile elements: `{type, flags, base_height, clearance_height, props[4]}`.
pub mod tile {
    pub const OFFSET: usize = 0x000010;
    pub const ELEMENT_SIZE: usize = 8;
    pub const MAX_ELEMENTS: usize = 0xC000;
    /// The element pool always covers a full-size map, whatever the
    /// playable size.
    pub const MAP_SIZE: usize = 128;

    pub const TYPE_MASK: u8 = 0x3C;
    pub const DIRECTION_MASK: u8 = 0x03;

    pub const SURFACE: u8 = 0x00;
    pub const PATH: u8 = 0x04;
    pub const TRACK: u8 = 0x08;
    pub const SMALL_SCENERY: u8 = 0x0C;
    pub const ENTRANCE: u8 = 0x10;
    pub const WALL: u8 = 0x14;
    pub const LARGE_SCENERY: u8 = 0x18;
    pub const BANNER: u8 = 0x1C;

    pub const FLAG_GHOST: u8 = 0x10;
    pub const FLAG_BROKEN: u8 = 0x20;
    pub const FLAG_INDESTRUCTIBLE: u8 = 0x40;
    pub const FLAG_LAST: u8 = 0x80;

    /// Height marking an element the game never placed.
    pub const HEIGHT_UNUSED: u8 = 255;

    pub const ENTRANCE_TYPE_PARK: u8 = 2;

    /// Wall edge nibble meaning "no wall on this edge".
    pub const WALL_NONE: u8 = 0x0F;

    pub const OWNERSHIP_OWNED: u8 = 0x20;

    /// Property bytes per element kind.
    pub mod surface {
        /// Slope in the low five bits, edge style in the high three.
        pub const SLOPE: usize = 0;
        /// Water height in the low five bits, terrain in the high three.
        pub const TERRAIN: usize = 1;
        pub const GRASS_LENGTH: usize = 2;
        pub const OWNERSHIP: usize = 3;
    }

    pub mod path {
        pub const SLOPE: usize = 0;
        pub const ADDITIONS: usize = 1;
        pub const EDGES: usize = 2;
        pub const RIDE_INDEX: usize = 3;
        pub const SLOPED: u8 = 0x04;
    }

    pub mod track {
        pub const TYPE: usize = 0;
        /// Sequence in the low nibble, colour scheme in the high nibble.
        pub const SEQUENCE: usize = 1;
        pub const RIDE_INDEX: usize = 3;
    }

    pub mod scenery {
        pub const TYPE: usize = 0;
        pub const AGE: usize = 1;
        pub const PRIMARY_COLOUR: usize = 2;
        pub const SECONDARY_COLOUR: usize = 3;
        pub const COLOUR_MASK: u8 = 0x1F;
    }

    pub mod entrance {
        pub const TYPE: usize = 0;
        /// Part index in the low nibble.
        pub const INDEX: usize = 1;
        pub const PATH_TYPE: usize = 2;
        pub const RIDE_INDEX: usize = 3;
    }

    pub mod banner {
        pub const INDEX: usize = 0;
        pub const POSITION: usize = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions_fit_between_neighbours() {
        assert!(tile::OFFSET + tile::MAX_ELEMENTS * tile::ELEMENT_SIZE <= 0x60010);
        assert_eq!(peep_spawn::OFFSET + peep_spawn::COUNT * peep_spawn::SIZE, 0x198856);
        let expenditure = history::EXPENDITURE_MONTHS * history::EXPENDITURE_TYPES * 4;
        assert_eq!(history::EXPENDITURE + expenditure, 0x199020);
        assert_eq!(
            research::ITEMS + research::ITEMS_COUNT * research::ITEM_SIZE,
            header::NEXT_RESEARCH_ITEM
        );
        assert_eq!(research::ITEMS_LL + research::ITEMS_LL_COUNT * research::ITEM_SIZE, 0x19A020);
        assert_eq!(banner::OFFSET + banner::COUNT * banner::SIZE, strings::TABLE);
        assert_eq!(strings::TABLE + strings::COUNT * strings::LEN + 4, ride::OFFSET);
        assert_eq!(ride::OFFSET + ride::COUNT * ride::SIZE + 2, header::VIEW_X);
        assert_eq!(header::SCENARIO_NAME + header::SCENARIO_NAME_LEN, header::SCENARIO_SLOT_INDEX);
        assert_eq!(header::SCENARIO_FLAGS + 4 + 432 + 4, IMAGE_SIZE);
    }
}
