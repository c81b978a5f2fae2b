use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::path::Path;

use crate::models::language::Language;

pub type RegionId = String;

/// Bilingual display text keyed by language.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<Language, String>);

impl LocalizedText {
    pub fn new(ar: &str, en: &str) -> Self {
        let mut names = BTreeMap::new();
        names.insert(Language::Ar, ar.to_string());
        names.insert(Language::En, en.to_string());
        Self(names)
    }

    /// Text for `lang`, falling back to Arabic and then to whatever exists.
    pub fn get(&self, lang: Language) -> &str {
        self.0
            .get(&lang)
            .filter(|s| !s.is_empty())
            .or_else(|| self.0.get(&Language::Ar).filter(|s| !s.is_empty()))
            .or_else(|| self.0.values().find(|s| !s.is_empty()))
            .map(String::as_str)
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Region {
    pub id: RegionId,
    pub name: LocalizedText,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Attraction {
    pub id: String,
    pub name: LocalizedText,
    pub price: u32,
    pub region: RegionId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StarClass {
    Three,
    Four,
    Five,
}

impl StarClass {
    pub fn stars(&self) -> u8 {
        match self {
            StarClass::Three => 3,
            StarClass::Four => 4,
            StarClass::Five => 5,
        }
    }

    pub fn from_stars(stars: u8) -> Option<Self> {
        match stars {
            3 => Some(StarClass::Three),
            4 => Some(StarClass::Four),
            5 => Some(StarClass::Five),
            _ => None,
        }
    }
}

impl Serialize for StarClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.stars())
    }
}

// The site keys hotel classes by "3"/"4"/"5", so accept both numbers and strings
impl<'de> Deserialize<'de> for StarClass {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let stars = match &value {
            serde_json::Value::Number(n) => n.as_u64(),
            serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        stars
            .and_then(|s| u8::try_from(s).ok())
            .and_then(StarClass::from_stars)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid star class: {}", value)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AmenityTag {
    Wifi,
    Pool,
    Breakfast,
    Spa,
    Parking,
    Food,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RoomOption {
    pub room_type: String,
    pub nightly_price: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Hotel {
    pub id: String,
    pub name: LocalizedText,
    pub star_class: StarClass,
    pub base_nightly_price: u32,
    #[serde(default)]
    pub amenities: BTreeSet<AmenityTag>,
    pub room_options: Vec<RoomOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Hotel {
    pub fn room_option(&self, room_type: &str) -> Option<&RoomOption> {
        self.room_options.iter().find(|r| r.room_type == room_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    UnknownRegion { attraction: String, region: String },
    DuplicateId(String),
    EmptyRoomOptions(String),
    DuplicateRoomType { hotel: String, room_type: String },
    Io(String),
    Parse(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::UnknownRegion { attraction, region } => write!(
                f,
                "Attraction {} references unknown region {}",
                attraction, region
            ),
            CatalogError::DuplicateId(id) => write!(f, "Duplicate catalog id: {}", id),
            CatalogError::EmptyRoomOptions(hotel) => {
                write!(f, "Hotel {} has no room options", hotel)
            }
            CatalogError::DuplicateRoomType { hotel, room_type } => write!(
                f,
                "Hotel {} lists room type {} more than once",
                hotel, room_type
            ),
            CatalogError::Io(err) => write!(f, "Failed to read catalog: {}", err),
            CatalogError::Parse(err) => write!(f, "Failed to parse catalog: {}", err),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Raw catalog document as stored on disk.
#[derive(Debug, Deserialize, Serialize)]
pub struct CatalogData {
    pub regions: Vec<Region>,
    pub attractions: Vec<Attraction>,
    pub hotels: Vec<Hotel>,
}

/// Immutable reference data: regions, their attractions and the hotels on offer.
#[derive(Debug, Clone)]
pub struct Catalog {
    regions: Vec<Region>,
    attractions: Vec<Attraction>,
    hotels: Vec<Hotel>,
    region_index: HashMap<String, usize>,
    attraction_index: HashMap<String, usize>,
    hotel_index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting dangling region references and malformed hotels.
    pub fn new(
        regions: Vec<Region>,
        attractions: Vec<Attraction>,
        hotels: Vec<Hotel>,
    ) -> Result<Self, CatalogError> {
        let mut region_ids = BTreeSet::new();
        for region in &regions {
            if !region_ids.insert(region.id.as_str()) {
                return Err(CatalogError::DuplicateId(region.id.clone()));
            }
        }

        let mut item_ids = BTreeSet::new();
        for attraction in &attractions {
            if !region_ids.contains(attraction.region.as_str()) {
                return Err(CatalogError::UnknownRegion {
                    attraction: attraction.id.clone(),
                    region: attraction.region.clone(),
                });
            }
            if !item_ids.insert(attraction.id.as_str()) {
                return Err(CatalogError::DuplicateId(attraction.id.clone()));
            }
        }

        let mut hotel_ids = BTreeSet::new();
        for hotel in &hotels {
            if !hotel_ids.insert(hotel.id.as_str()) {
                return Err(CatalogError::DuplicateId(hotel.id.clone()));
            }
            if hotel.room_options.is_empty() {
                return Err(CatalogError::EmptyRoomOptions(hotel.id.clone()));
            }
            let mut room_types = BTreeSet::new();
            for room in &hotel.room_options {
                if !room_types.insert(room.room_type.as_str()) {
                    return Err(CatalogError::DuplicateRoomType {
                        hotel: hotel.id.clone(),
                        room_type: room.room_type.clone(),
                    });
                }
            }
        }

        Ok(Self::assemble(regions, attractions, hotels))
    }

    pub fn from_data(data: CatalogData) -> Result<Self, CatalogError> {
        Self::new(data.regions, data.attractions, data.hotels)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::from_data(data)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw =
            std::fs::read_to_string(path).map_err(|e| CatalogError::Io(e.to_string()))?;
        Self::from_json_str(&raw)
    }

    fn assemble(regions: Vec<Region>, attractions: Vec<Attraction>, hotels: Vec<Hotel>) -> Self {
        let region_index = regions
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();
        let attraction_index = attractions
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id.clone(), i))
            .collect();
        let hotel_index = hotels
            .iter()
            .enumerate()
            .map(|(i, h)| (h.id.clone(), i))
            .collect();

        Self {
            regions,
            attractions,
            hotels,
            region_index,
            attraction_index,
            hotel_index,
        }
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self, id: &str) -> Option<&Region> {
        self.region_index.get(id).map(|&i| &self.regions[i])
    }

    pub fn attraction(&self, id: &str) -> Option<&Attraction> {
        self.attraction_index.get(id).map(|&i| &self.attractions[i])
    }

    /// Attractions of one region, in catalog order.
    pub fn attractions_in<'a>(&'a self, region: &'a str) -> impl Iterator<Item = &'a Attraction> {
        self.attractions.iter().filter(move |a| a.region == region)
    }

    pub fn hotels(&self) -> &[Hotel] {
        &self.hotels
    }

    pub fn hotel(&self, id: &str) -> Option<&Hotel> {
        self.hotel_index.get(id).map(|&i| &self.hotels[i])
    }

    pub fn hotels_in_class(&self, class: StarClass) -> impl Iterator<Item = &Hotel> {
        self.hotels.iter().filter(move |h| h.star_class == class)
    }

    pub fn to_data(&self) -> CatalogData {
        CatalogData {
            regions: self.regions.clone(),
            attractions: self.attractions.clone(),
            hotels: self.hotels.clone(),
        }
    }

    /// The built-in catalog of Egyptian governorates, sites and hotels.
    pub fn egypt() -> Self {
        let (regions, attractions, hotels) = egypt_entries();
        Self::assemble(regions, attractions, hotels)
    }
}

fn region(id: &str, ar: &str, en: &str) -> Region {
    Region {
        id: id.to_string(),
        name: LocalizedText::new(ar, en),
    }
}

fn attraction(region: &str, id: &str, ar: &str, en: &str, price: u32) -> Attraction {
    Attraction {
        id: id.to_string(),
        name: LocalizedText::new(ar, en),
        price,
        region: region.to_string(),
    }
}

fn hotel(
    id: &str,
    en: &str,
    star_class: StarClass,
    base_nightly_price: u32,
    amenities: &[AmenityTag],
    rooms: &[(&str, u32)],
) -> Hotel {
    Hotel {
        id: id.to_string(),
        name: LocalizedText::new(&format!("فندق {}", en), en),
        star_class,
        base_nightly_price,
        amenities: amenities.iter().copied().collect(),
        room_options: rooms
            .iter()
            .map(|(room_type, nightly_price)| RoomOption {
                room_type: room_type.to_string(),
                nightly_price: *nightly_price,
            })
            .collect(),
        image: Some(format!("{}.png", id)),
    }
}

fn egypt_entries() -> (Vec<Region>, Vec<Attraction>, Vec<Hotel>) {
    use AmenityTag::*;

    let regions = vec![
        region("giza", "الجيزة", "Giza"),
        region("luxor", "الأقصر", "Luxor"),
        region("aswan", "أسوان", "Aswan"),
        region("alexandria", "الإسكندرية", "Alexandria"),
        region("cairo", "القاهرة", "Cairo"),
    ];

    let attractions = vec![
        attraction("giza", "pyramids", "الأهرامات وأبو الهول", "Pyramids & Sphinx", 200),
        attraction("giza", "saqqara", "هرم سقارة المدرج", "Saqqara Step Pyramid", 120),
        attraction("giza", "grand-museum", "المتحف المصري الكبير", "Grand Egyptian Museum", 150),
        attraction("giza", "memphis", "متحف ممفيس المفتوح", "Memphis Open Air Museum", 80),
        attraction("giza", "queens-pyramids", "أهرامات الملكات", "Queens Pyramids", 85),
        attraction("luxor", "karnak", "معبد الكرنك", "Karnak Temple", 180),
        attraction("luxor", "valley", "وادي الملوك", "Valley of the Kings", 160),
        attraction("luxor", "luxor-temple", "معبد الأقصر", "Luxor Temple", 140),
        attraction("luxor", "hatshepsut", "معبد حتشبسوت", "Hatshepsut Temple", 130),
        attraction("luxor", "medinet-habu", "معبد مدينة هابو", "Medinet Habu Temple", 110),
        attraction("luxor", "ramesseum", "معبد الرامسيس", "Ramesseum Temple", 100),
        attraction("luxor", "nobles-tombs", "مقابر النبلاء", "Nobles Tombs", 90),
        attraction("aswan", "abu", "معبد أبو سمبل", "Abu Simbel", 220),
        attraction("aswan", "philae", "معبد فيلة", "Philae Temple", 140),
        attraction("aswan", "kom-ombo", "معبد كوم أمبو", "Kom Ombo Temple", 110),
        attraction("aswan", "edfu", "معبد إدفو", "Edfu Temple", 100),
        attraction("aswan", "kalabsha", "معبد كلابشة", "Kalabsha Temple", 90),
        attraction("aswan", "unfinished-obelisk", "المسلة الناقصة", "Unfinished Obelisk", 70),
        attraction("aswan", "sehel", "جزيرة سهيل ونقوشها", "Sehel Island Inscriptions", 85),
        attraction("alexandria", "library", "مكتبة الإسكندرية", "Library of Alexandria", 100),
        attraction("alexandria", "kom-el-shoqafa", "مقابر كوم الشقافة", "Kom el-Shoqafa Catacombs", 90),
        attraction("alexandria", "pompeys-pillar", "عمود بومبي", "Pompeys Pillar", 70),
        attraction("alexandria", "serapeum", "معبد السربايوم", "Serapeum Temple", 85),
        attraction("cairo", "museum", "المتحف المصري", "Egyptian Museum", 120),
        attraction("cairo", "nilometer", "مقياس النيل", "Nilometer", 70),
    ];

    let hotels = vec![
        hotel("hotel-nubian-charm", "Nubian Charm", StarClass::Three, 60, &[Wifi, Food], &[("single", 60), ("double", 90)]),
        hotel("hotel-aswan-plaza", "Aswan Plaza", StarClass::Three, 50, &[Wifi], &[("double", 50)]),
        hotel("hotel-giza-pyramid", "Giza Pyramid", StarClass::Four, 120, &[Wifi, Pool, Breakfast], &[("standard", 120), ("deluxe", 180)]),
        hotel("hotel-luxor-royal", "Luxor Royal", StarClass::Four, 110, &[Wifi, Breakfast], &[("standard", 110), ("suite", 200)]),
        hotel("hotel-grand-cairo", "Grand Cairo", StarClass::Five, 220, &[Wifi, Pool, Spa, Breakfast], &[("deluxe", 220), ("suite", 350)]),
        hotel("hotel-karnak-luxury", "Karnak Luxury", StarClass::Five, 250, &[Wifi, Pool, Breakfast, Parking], &[("deluxe", 250), ("presidential", 500)]),
    ];

    (regions, attractions, hotels)
}
