//! Known scenario titles of every release.
//!
//! Scenario files are matched against these lists by name to recover their
//! release, category, and position in the original scenario list. Legacy
//! scenario ids are assigned to the first-game titles in list order and to a
//! handful of real-park and bonus scenarios.

use super::entry::{ScenarioCategory, ScenarioSource};

use ScenarioCategory::{
    Beginner as B, BuildYourOwn as Byo, Challenging as C, Dlc, Expert as E, Other as O, Real as R,
};

struct Title {
    title: &'static str,
    park_name: &'static str,
    category: ScenarioCategory,
    id: Option<u8>,
}

const fn t(title: &'static str, category: ScenarioCategory) -> Title {
    Title {
        title,
        park_name: title,
        category,
        id: None,
    }
}

const fn tp(title: &'static str, park_name: &'static str, category: ScenarioCategory) -> Title {
    Title {
        title,
        park_name,
        category,
        id: None,
    }
}

const fn ti(
    title: &'static str,
    park_name: &'static str,
    category: ScenarioCategory,
    id: u8,
) -> Title {
    Title {
        title,
        park_name,
        category,
        id: Some(id),
    }
}

static RCT1: [Title; 22] = [
    t("Forest Frontiers", B),
    t("Dynamite Dunes", B),
    t("Leafy Lake", B),
    t("Diamond Heights", B),
    t("Evergreen Gardens", B),
    t("Bumbly Beach", B),
    t("Trinity Islands", C),
    t("Katie's Dreamland", C),
    t("Pokey Park", C),
    t("White Water Park", C),
    t("Millennium Mines", C),
    t("Karts & Coasters", C),
    t("Mel's World", C),
    t("Mystic Mountain", C),
    t("Pacific Pyramids", C),
    t("Crumbly Woods", C),
    t("Paradise Pier", C),
    t("Lightning Peaks", E),
    t("Ivory Towers", E),
    t("Rainbow Valley", E),
    t("Thunder Rock", E),
    t("Mega Park", O),
];

static RCT1_AA: [Title; 30] = [
    t("Whispering Cliffs", B),
    t("Three Monkeys Park", B),
    t("Canary Mines", B),
    t("Barony Bridge", B),
    t("Funtopia", B),
    t("Haunted Harbour", B),
    t("Fun Fortress", B),
    t("Future World", B),
    t("Gentle Glen", B),
    t("Jolly Jungle", C),
    t("Hydro Hills", C),
    t("Sprightly Park", C),
    t("Magic Quarters", C),
    t("Fruit Farm", C),
    t("Butterfly Dam", C),
    t("Coaster Canyon", C),
    t("Thunderstorm Park", C),
    t("Harmonic Hills", C),
    t("Roman Village", C),
    t("Swamp Cove", C),
    t("Adrenaline Heights", C),
    t("Utopia", C),
    t("Rotting Heights", E),
    t("Fiasco Forest", E),
    t("Pickle Park", E),
    t("Giggle Downs", E),
    t("Mineral Park", E),
    t("Coaster Crazy", E),
    t("Urban Park", E),
    t("Geoffrey Gardens", E),
];

static RCT1_LL: [Title; 30] = [
    t("Iceberg Islands", B),
    t("Volcania", B),
    t("Arid Heights", B),
    t("Razor Rocks", B),
    t("Crater Lake", B),
    t("Vertigo Views", B),
    t("Paradise Pier 2", C),
    t("Dragon's Cove", C),
    t("Good Knight Park", C),
    t("Wacky Warren", C),
    t("Grand Glacier", C),
    t("Crazy Craters", C),
    t("Dusty Desert", C),
    t("Woodworm Park", C),
    t("Icarus Park", C),
    t("Sunny Swamps", C),
    t("Frightmare Hills", C),
    t("Thunder Rocks", C),
    t("Octagon Park", C),
    t("Pleasure Island", C),
    t("Icicle Worlds", C),
    t("Southern Sands", C),
    t("Tiny Towers", C),
    t("Nevermore Park", C),
    t("Pacifica", C),
    t("Urban Jungle", E),
    t("Terror Town", E),
    t("Megaworld Park", E),
    t("Venus Ponds", E),
    t("Micro Park", E),
];

static RCT2: [Title; 15] = [
    t("Crazy Castle", B),
    t("Electric Fields", B),
    t("Factory Capers", B),
    t("Amity Airfield", C),
    t("Botany Breakers", C),
    t("Bumbly Bazaar", C),
    t("Dusty Greens", C),
    t("Fungus Woods", C),
    t("Gravity Gardens", C),
    t("Infernal Views", C),
    t("Alpine Adventures", E),
    t("Extreme Heights", E),
    t("Ghost Town", E),
    t("Lucky Lake", E),
    t("Rainbow Summit", E),
];

static RCT2_WW: [Title; 17] = [
    tp("Africa - Victoria Falls", "Over The Edge", B),
    tp("Asia - Great Wall of China Tourism Enhancement", "Great Wall of China", B),
    tp("North America - Grand Canyon", "Canyon Calamities", B),
    tp("South America - Rio Carnival", "Sugarloaf Shores", B),
    tp("Africa - African Diamond Mine", "Mines of Africa", C),
    tp("Asia - Maharaja Palace", "Park Maharaja", C),
    tp("Australasia - Ayers Rock", "Ayers Adventure", C),
    tp("Europe - European Cultural Festival", "European Extravaganza", C),
    tp("North America - Rollercoaster Heaven", "Rollercoaster Heaven", C),
    tp("South America - Inca Lost City", "Lost City Founder", C),
    tp("Africa - Oasis", "Mirage Madness", E),
    tp("Antarctic - Ecological Salvage", "Icy Adventures", E),
    tp("Asia - Japanese Coastal Reclaim", "Okinawa Coast", E),
    tp("Australasia - Fun at the Beach", "Beach Barbecue Blast", E),
    tp("Europe - Renovation", "From The Ashes", E),
    tp("N. America - Extreme Hawaiian Island", "Wacky Waikiki", E),
    tp("South America - Rain Forest Plateau", "Rainforest Romp", E),
];

static RCT2_TT: [Title; 14] = [
    tp("Dark Age - Robin Hood", "Sherwood Forest", B),
    tp("Prehistoric - After the Asteroid", "Crater Carnage", B),
    tp("Roaring Twenties - Prison Island", "Alcatraz", B),
    tp("Rock 'n' Roll - Flower Power", "Woodstock", B),
    tp("Dark Age - Castle", "Cliffside Castle", C),
    tp("Future - First Encounters", "Extraterrestrial Extravaganza", C),
    tp("Mythological - Animatronic Film Set", "Animatronic Antics", C),
    tp("Prehistoric - Jurassic Safari", "Coastersaurus", C),
    tp("Roaring Twenties - Schneider Cup", "Schneider Shores", C),
    tp("Future - Future World", "Gemini City", E),
    tp("Mythological - Cradle of Civilisation", "Mythological Madness", E),
    tp("Prehistoric - Stone Age", "Rocky Rambles", E),
    tp("Roaring Twenties - Skyscrapers", "Metropolis", E),
    tp("Rock 'n' Roll - Rock 'n' Roll", "Rock 'n' Roll Revival", E),
];

static REAL: [Title; 8] = [
    ti("Alton Towers", "Alton Towers", R, 82),
    ti("Heide-Park", "Heide-Park", R, 83),
    ti("Blackpool Pleasure Beach", "Blackpool Pleasure Beach", R, 84),
    t("Six Flags Belgium", R),
    t("Six Flags Great Adventure", R),
    t("Six Flags Holland", R),
    t("Six Flags Magic Mountain", R),
    t("Six Flags over Texas", R),
];

static OTHER: [Title; 13] = [
    ti("Fort Anachronism", "Fort Anachronism", Dlc, 85),
    ti("PC Player", "???", Dlc, 86),
    ti("PC Gaming World", "???", Dlc, 87),
    ti("gameplay", "???", Dlc, 88),
    tp("Panda World", "???", Dlc),
    tp("Competition Land 1", "???", Dlc),
    tp("Competition Land 2", "???", Dlc),
    tp("Build your own Six Flags Belgium", "Six Flags Belgium", Byo),
    tp("Build your own Six Flags Great Adventure", "Six Flags Great Adventure", Byo),
    tp("Build your own Six Flags Holland", "Six Flags Holland", Byo),
    tp("Build your own Six Flags Magic Mountain", "Six Flags Magic Mountain", Byo),
    tp("Build your own Six Flags Park", "Six Flags", Byo),
    tp("Build your own Six Flags over Texas", "Six Flags over Texas", Byo),
];

static GROUPS: [(ScenarioSource, &[Title]); 8] = [
    (ScenarioSource::Rct1, &RCT1),
    (ScenarioSource::Rct1Aa, &RCT1_AA),
    (ScenarioSource::Rct1Ll, &RCT1_LL),
    (ScenarioSource::Rct2, &RCT2),
    (ScenarioSource::Rct2Ww, &RCT2_WW),
    (ScenarioSource::Rct2Tt, &RCT2_TT),
    (ScenarioSource::Real, &REAL),
    (ScenarioSource::Other, &OTHER),
];

/// Alternative (mostly US) titles and the canonical title they map to.
static ALTERNATIVE_NAMES: [(&str, &str); 9] = [
    ("Katie's World", "Katie's Dreamland"),
    ("Dinky Park", "Pokey Park"),
    ("Aqua Park", "White Water Park"),
    ("Mothball Mountain", "Mystic Mountain"),
    ("Big Pier", "Paradise Pier"),
    ("Big Pier 2", "Paradise Pier 2"),
    ("Haunted Harbor", "Haunted Harbour"),
    ("Mythological - Cradle of Civilization", "Mythological - Cradle of Civilisation"),
    ("Geoffery Gardens", "Geoffrey Gardens"),
];

/// A resolved known scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceDesc {
    pub title: &'static str,
    pub park_name: &'static str,
    pub id: Option<u8>,
    pub source: ScenarioSource,
    /// Position across all known scenarios.
    pub index: u16,
    pub category: ScenarioCategory,
}

fn descriptors() -> Vec<SourceDesc> {
    let mut out = Vec::with_capacity(count());
    for (source, titles) in GROUPS.iter() {
        for (position, title) in titles.iter().enumerate() {
            out.push(SourceDesc {
                title: title.title,
                park_name: title.park_name,
                id: title.id.or_else(|| legacy_id(*source, position)),
                source: *source,
                index: out.len() as u16,
                category: title.category,
            });
        }
    }
    out
}

/// Looks up a known scenario by title, ignoring case.
pub fn try_get_by_name(name: &str) -> Option<SourceDesc> {
    descriptors()
        .into_iter()
        .find(|d| d.title.eq_ignore_ascii_case(name))
}

/// Looks up a known scenario by its legacy id.
pub fn try_get_by_id(id: u8) -> Option<SourceDesc> {
    descriptors().into_iter().find(|d| d.id == Some(id))
}

/// Legacy id of a first-game title: its position across the three first-game
/// lists.
fn legacy_id(source: ScenarioSource, position: usize) -> Option<u8> {
    let base = match source {
        ScenarioSource::Rct1 => 0,
        ScenarioSource::Rct1Aa => RCT1.len(),
        ScenarioSource::Rct1Ll => RCT1.len() + RCT1_AA.len(),
        _ => return None,
    };
    u8::try_from(base + position).ok()
}

/// Strips a release prefix and maps alternative titles to canonical ones.
pub fn normalise_name(name: &str) -> String {
    let mut rest = name;
    for prefix in ["RCT1", "RCT2", "RCT"] {
        if let Some(head) = rest.get(..prefix.len())
            && head.eq_ignore_ascii_case(prefix)
        {
            rest = &rest[prefix.len()..];
            break;
        }
    }
    let rest = rest.trim_start();

    ALTERNATIVE_NAMES
        .iter()
        .find(|(alt, _)| alt.eq_ignore_ascii_case(rest))
        .map(|(_, original)| original.to_string())
        .unwrap_or_else(|| rest.to_string())
}

/// Total number of known scenarios.
pub fn count() -> usize {
    GROUPS.iter().map(|(_, titles)| titles.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_sizes() {
        assert_eq!(count(), 22 + 30 + 30 + 15 + 17 + 14 + 8 + 13);
    }

    #[test]
    fn test_lookup_by_name_case_insensitive() {
        let desc = try_get_by_name("forest frontiers").unwrap();
        assert_eq!(desc.source, ScenarioSource::Rct1);
        assert_eq!(desc.index, 0);
        assert_eq!(desc.id, Some(0));
        assert_eq!(desc.category, ScenarioCategory::Beginner);

        let desc = try_get_by_name("Crazy Castle").unwrap();
        assert_eq!(desc.source, ScenarioSource::Rct2);
        assert_eq!(desc.index, 82);
        assert_eq!(desc.id, None);
    }

    #[test]
    fn test_index_is_global() {
        let desc = try_get_by_name("Whispering Cliffs").unwrap();
        assert_eq!(desc.index, 22);
        let desc = try_get_by_name("Build your own Six Flags over Texas").unwrap();
        assert_eq!(desc.index as usize, count() - 1);
    }

    #[test]
    fn test_first_game_ids_follow_list_order() {
        assert_eq!(try_get_by_name("Utopia").unwrap().id, Some(43));
        assert_eq!(try_get_by_name("Urban Park").unwrap().id, Some(50));
        assert_eq!(try_get_by_name("Micro Park").unwrap().id, Some(81));
        assert_eq!(try_get_by_id(13).unwrap().title, "Mystic Mountain");
        assert_eq!(try_get_by_id(85).unwrap().title, "Fort Anachronism");
        assert!(try_get_by_id(200).is_none());
    }

    #[test]
    fn test_unknown_name() {
        assert!(try_get_by_name("My Own Park").is_none());
    }

    #[test]
    fn test_normalise_prefix_and_aliases() {
        assert_eq!(normalise_name("RCT1 Forest Frontiers"), "Forest Frontiers");
        assert_eq!(normalise_name("rct2Crazy Castle"), "Crazy Castle");
        assert_eq!(normalise_name("Katie's World"), "Katie's Dreamland");
        assert_eq!(normalise_name("RCT Big Pier 2"), "Paradise Pier 2");
        assert_eq!(normalise_name("Custom Park"), "Custom Park");
    }
}
