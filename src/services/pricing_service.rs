use chrono::NaiveDate;

use crate::models::catalog::Catalog;
use crate::models::selection::{HotelChoice, Selection};
use crate::models::wizard::PriceSummary;

pub const CURRENCY: &str = "EGP";

pub struct PricingService;

impl PricingService {
    /// Sum of the ticket prices of the chosen attractions
    pub fn calculate_attractions_total(catalog: &Catalog, selection: &Selection) -> u64 {
        selection
            .attraction_ids()
            .iter()
            .filter_map(|id| catalog.attraction(id))
            .map(|attraction| u64::from(attraction.price))
            .fold(0, u64::saturating_add)
    }

    /// Billable nights between the two dates, never fewer than one
    pub fn calculate_nights(start: Option<NaiveDate>, end: Option<NaiveDate>) -> u32 {
        let days = match (start, end) {
            (Some(start), Some(end)) => (end - start).num_days(),
            _ => 0,
        };
        u32::try_from(days.max(1)).unwrap_or(u32::MAX)
    }

    /// Room-type rate when the hotel lists it, otherwise the hotel's base rate
    pub fn nightly_rate(catalog: &Catalog, choice: &HotelChoice) -> u64 {
        catalog
            .hotel(&choice.hotel_id)
            .map(|hotel| {
                hotel
                    .room_option(&choice.room_type)
                    .map(|room| room.nightly_price)
                    .unwrap_or(hotel.base_nightly_price)
            })
            .map(u64::from)
            .unwrap_or(0)
    }

    /// `rate × nights × rooms`, pinned at `u64::MAX` instead of wrapping
    pub fn price_stay(nightly_rate: u64, nights: u32, room_count: u32) -> u64 {
        nightly_rate
            .saturating_mul(u64::from(nights))
            .saturating_mul(u64::from(room_count))
    }

    pub fn calculate_hotel_total(catalog: &Catalog, selection: &Selection, nights: u32) -> u64 {
        selection
            .hotel()
            .map(|choice| {
                Self::price_stay(Self::nightly_rate(catalog, choice), nights, choice.room_count)
            })
            .unwrap_or(0)
    }

    /// Price the whole trip. Pure: the same selection always gives the same summary.
    pub fn compute(catalog: &Catalog, selection: &Selection) -> PriceSummary {
        let attractions_total = Self::calculate_attractions_total(catalog, selection);
        let nights = Self::calculate_nights(selection.start_date(), selection.end_date());
        let hotel_total = Self::calculate_hotel_total(catalog, selection, nights);

        PriceSummary {
            attractions_total,
            hotel_total,
            nights,
            grand_total: attractions_total.saturating_add(hotel_total),
            currency: CURRENCY,
        }
    }
}
