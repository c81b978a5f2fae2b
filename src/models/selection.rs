use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::models::catalog::{Catalog, RegionId};

/// Most rooms one booking can hold
pub const MAX_ROOM_COUNT: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HotelChoice {
    pub hotel_id: String,
    pub room_type: String,
    pub room_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ContactInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    UnknownRegion(String),
    UnknownHotel(String),
    UnknownRoomType { hotel_id: String, room_type: String },
    InvalidRoomCount(u32),
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::UnknownRegion(id) => write!(f, "Unknown region: {}", id),
            SelectionError::UnknownHotel(id) => write!(f, "Unknown hotel: {}", id),
            SelectionError::UnknownRoomType {
                hotel_id,
                room_type,
            } => write!(f, "Hotel {} has no room type {}", hotel_id, room_type),
            SelectionError::InvalidRoomCount(count) => {
                write!(
                    f,
                    "Room count must be between 1 and {}, got {}",
                    MAX_ROOM_COUNT, count
                )
            }
        }
    }
}

impl std::error::Error for SelectionError {}

/// A visitor's in-progress itinerary.
///
/// Writes are permissive: dates, party size and contact details are stored as
/// given so half-finished input can be shown back. Only the region/attraction
/// and hotel/room-type relationships are enforced here; everything else is
/// checked when the wizard tries to move forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    region: Option<RegionId>,
    attraction_ids: BTreeSet<String>,
    hotel: Option<HotelChoice>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    party_size: i64,
    contact: ContactInfo,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            region: None,
            attraction_ids: BTreeSet::new(),
            hotel: None,
            start_date: None,
            end_date: None,
            party_size: 1,
            contact: ContactInfo::default(),
        }
    }
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn attraction_ids(&self) -> &BTreeSet<String> {
        &self.attraction_ids
    }

    pub fn hotel(&self) -> Option<&HotelChoice> {
        self.hotel.as_ref()
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn party_size(&self) -> i64 {
        self.party_size
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    /// Select (or unset) the region. Switching to a different region drops the
    /// attractions picked for the old one.
    pub fn set_region(
        &mut self,
        catalog: &Catalog,
        region: Option<&str>,
    ) -> Result<(), SelectionError> {
        if let Some(id) = region {
            if catalog.region(id).is_none() {
                return Err(SelectionError::UnknownRegion(id.to_string()));
            }
        }
        if self.region.as_deref() != region {
            self.attraction_ids.clear();
        }
        self.region = region.map(str::to_string);
        Ok(())
    }

    /// Flip an attraction in or out of the selection. Returns `false` without
    /// touching anything when the attraction is not part of the current region.
    pub fn toggle_attraction(&mut self, catalog: &Catalog, id: &str) -> bool {
        let in_region = match (self.region.as_deref(), catalog.attraction(id)) {
            (Some(region), Some(attraction)) => attraction.region == region,
            _ => false,
        };
        if !in_region {
            return false;
        }
        if !self.attraction_ids.remove(id) {
            self.attraction_ids.insert(id.to_string());
        }
        true
    }

    /// Replace the hotel choice. At most one hotel is held at a time, with
    /// between 1 and `MAX_ROOM_COUNT` rooms.
    pub fn choose_hotel(
        &mut self,
        catalog: &Catalog,
        hotel_id: &str,
        room_type: &str,
        room_count: u32,
    ) -> Result<(), SelectionError> {
        let hotel = catalog
            .hotel(hotel_id)
            .ok_or_else(|| SelectionError::UnknownHotel(hotel_id.to_string()))?;
        if hotel.room_option(room_type).is_none() {
            return Err(SelectionError::UnknownRoomType {
                hotel_id: hotel_id.to_string(),
                room_type: room_type.to_string(),
            });
        }
        if room_count == 0 || room_count > MAX_ROOM_COUNT {
            return Err(SelectionError::InvalidRoomCount(room_count));
        }
        self.hotel = Some(HotelChoice {
            hotel_id: hotel_id.to_string(),
            room_type: room_type.to_string(),
            room_count,
        });
        Ok(())
    }

    pub fn clear_hotel(&mut self) {
        self.hotel = None;
    }

    pub fn set_dates(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.start_date = start;
        self.end_date = end;
    }

    pub fn set_party_size(&mut self, party_size: i64) {
        self.party_size = party_size;
    }

    pub fn set_contact(&mut self, full_name: &str, email: &str, phone: &str) {
        self.contact = ContactInfo {
            full_name: full_name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        };
    }
}
