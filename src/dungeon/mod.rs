//! Rooms and the treasury

pub mod economy;
pub mod room;

pub use economy::{calculate_wages, process_wages, treasury_capacity, Economy, WagePayment};
pub use room::{can_place_room, place_room, remove_room_at, Room, RoomType, ROOM_SIZE};
