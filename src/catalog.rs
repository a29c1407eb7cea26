/// A curated image the service knows how to serve.
#[derive(Debug, PartialEq, Eq)]
pub struct ImageEntry {
    pub key: &'static str,
    pub location: &'static str,
    pub title: &'static str,
    pub caption: &'static str,
    pub alt_text: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKey {
    RomeoJulietDicksee,
    RomeoJulietWaterhouse,
    ShakespearePortrait,
    SolarSystem,
    DnaStructure,
}

impl ImageKey {
    fn index(self) -> usize {
        match self {
            ImageKey::RomeoJulietDicksee => 0,
            ImageKey::RomeoJulietWaterhouse => 1,
            ImageKey::ShakespearePortrait => 2,
            ImageKey::SolarSystem => 3,
            ImageKey::DnaStructure => 4,
        }
    }
}

/// Registry the catalog images are hosted on, reported as `source`.
pub const SOURCE_TAG: &str = "wikimedia";

static CATALOG: [ImageEntry; 5] = [
    ImageEntry {
        key: "romeo_juliet_dicksee",
        location: "https://upload.wikimedia.org/wikipedia/commons/thumb/e/e6/DickseeRomeoandJuliet.jpg/400px-DickseeRomeoandJuliet.jpg",
        title: "Romeo and Juliet by Frank Dicksee",
        caption: "Romeo and Juliet by Frank Dicksee (1884) - Public Domain",
        alt_text: "Famous painting of Romeo and Juliet embracing",
    },
    ImageEntry {
        key: "romeo_juliet_waterhouse",
        location: "https://upload.wikimedia.org/wikipedia/commons/thumb/b/ba/John_William_Waterhouse_-_Juliet_-_1898.jpg/400px-John_William_Waterhouse_-_Juliet_-_1898.jpg",
        title: "Juliet by John William Waterhouse",
        caption: "Juliet by John William Waterhouse (1898) - Public Domain",
        alt_text: "Painting of Juliet on her balcony",
    },
    ImageEntry {
        key: "shakespeare_portrait",
        location: "https://upload.wikimedia.org/wikipedia/commons/thumb/a/a2/Shakespeare.jpg/220px-Shakespeare.jpg",
        title: "William Shakespeare Portrait",
        caption: "William Shakespeare - The Bard",
        alt_text: "Portrait of William Shakespeare",
    },
    ImageEntry {
        key: "solar_system",
        location: "https://upload.wikimedia.org/wikipedia/commons/thumb/c/cb/Planets2013.svg/450px-Planets2013.svg.png",
        title: "Solar System Diagram",
        caption: "The Solar System - Educational Diagram",
        alt_text: "Diagram showing all planets in the solar system",
    },
    ImageEntry {
        key: "dna_structure",
        location: "https://upload.wikimedia.org/wikipedia/commons/thumb/4/4c/DNA_Structure%2BKey%2BLabelled.pn_NoBB.png/220px-DNA_Structure%2BKey%2BLabelled.pn_NoBB.png",
        title: "DNA Double Helix",
        caption: "DNA Double Helix Structure",
        alt_text: "3D model of DNA double helix",
    },
];

pub fn lookup(key: ImageKey) -> &'static ImageEntry {
    &CATALOG[key.index()]
}
