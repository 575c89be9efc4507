use std::collections::HashSet;

use crate::domain::models::booking::{Booking, UserBooking};
use crate::domain::models::event::{Event, EventListing};

/// Marks each event in a page with whether the requesting user has booked
/// it. The set comes from a single query over the user's bookings; an
/// anonymous requester passes an empty set and everything stays false.
pub fn mark_user_bookings(events: Vec<Event>, booked_event_ids: &HashSet<String>) -> Vec<EventListing> {
    events
        .into_iter()
        .map(|event| {
            let user_has_booked = booked_event_ids.contains(&event.id);
            EventListing { event, user_has_booked }
        })
        .collect()
}

/// Flattens a page of (booking, referenced event) rows for the
/// "my bookings" listing. A booking whose event has been deleted is
/// dropped from the result; the listing must stay clean rather than
/// carry nulls or fail. Input order is preserved.
pub fn flatten_user_bookings(rows: Vec<(Booking, Option<Event>)>) -> Vec<UserBooking> {
    rows.into_iter()
        .filter_map(|(booking, event)| event.map(|event| flatten(booking, event)))
        .collect()
}

fn flatten(booking: Booking, event: Event) -> UserBooking {
    UserBooking {
        id: booking.id,
        status: booking.status,
        booked_at: booking.created_at,
        event_id: event.id,
        event_name: event.name,
        event_description: event.description,
        event_date: event.date,
        event_venue: event.venue,
        event_price: event.price,
        event_image: event.image,
        event_category: event.category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn event(id: &str) -> Event {
        Event {
            id: id.to_string(),
            name: format!("Event {}", id),
            description: "desc".to_string(),
            category: "concert".to_string(),
            date: Utc::now(),
            venue: "Hall".to_string(),
            price: 10.0,
            image: "img".to_string(),
            capacity: 100,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn marks_only_booked_events() {
        let booked: HashSet<String> = ["a".to_string()].into_iter().collect();
        let listings = mark_user_bookings(vec![event("a"), event("b")], &booked);
        assert!(listings[0].user_has_booked);
        assert!(!listings[1].user_has_booked);
    }

    #[test]
    fn empty_set_marks_nothing() {
        let listings = mark_user_bookings(vec![event("a"), event("b")], &HashSet::new());
        assert!(listings.iter().all(|l| !l.user_has_booked));
    }

    #[test]
    fn dangling_rows_are_dropped_in_order() {
        let rows = vec![
            (Booking::new("a".into(), "u".into()), Some(event("a"))),
            (Booking::new("gone".into(), "u".into()), None),
            (Booking::new("b".into(), "u".into()), Some(event("b"))),
        ];
        let flattened = flatten_user_bookings(rows);
        assert_eq!(flattened.len(), 2);
        assert_eq!(flattened[0].event_id, "a");
        assert_eq!(flattened[1].event_id, "b");
    }
}
