//! Reference list of room names offered when building a report.

/// Predefined room names, in the order a walk-through usually visits them.
pub const PREDEFINED_ROOMS: [&str; 23] = [
    "Front Garden",
    "Porch",
    "Meter Cupboard",
    "Hallway",
    "WC",
    "Living Room",
    "Dining Room",
    "Kitchen",
    "Stairs",
    "Landing",
    "Airing Cupboard",
    "Bedroom 1",
    "Bedroom 2",
    "Bedroom 3",
    "Bedroom 4",
    "Bedroom 5",
    "Ensuite",
    "Bathroom",
    "Misc First Floor",
    "Rear Garden",
    "Outbuilding",
    "Garage",
    "Loft",
];
