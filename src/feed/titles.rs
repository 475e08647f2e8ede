// Card titles - file names are unreadable for the audience, so every card
// gets a made-up, kid-friendly title instead

use crate::random::RandomSource;

const ADJECTIVES: &[&str] = &[
    "Happy", "Funny", "Silly", "Magic", "Rainbow", "Sunny", "Bouncy", "Giggly", "Sparkly", "Cheerful",
    "Playful", "Colorful", "Friendly", "Jolly", "Sweet", "Brave", "Kind", "Gentle", "Amazing", "Wonder",
    "Super", "Big", "Little", "Tiny", "Cute", "Adorable", "Awesome", "Cool", "Fun", "Nice",
];

const CHARACTERS: &[&str] = &[
    "Bunny", "Puppy", "Kitten", "Bear", "Elephant", "Lion", "Tiger", "Monkey", "Panda", "Giraffe",
    "Dinosaur", "Dragon", "Unicorn", "Princess", "Prince", "Fairy", "Robot", "Superhero", "Pirate", "Cowboy",
    "Frog", "Duck", "Owl", "Butterfly", "Ladybug", "Fish", "Dolphin", "Whale", "Octopus", "Starfish",
];

const ACTIONS: &[&str] = &[
    "Adventure", "Dance Party", "Song Time", "Playground Fun", "Learning Games", "Counting Fun", "ABC Time",
    "Color Quest", "Shape Safari", "Music Time", "Story Hour", "Bedtime Tales", "Morning Songs", "Playtime",
    "Friendship", "Birthday Party", "Picnic Day", "Beach Fun", "Snow Day", "Garden Party", "Tea Time",
    "Hide and Seek", "Treasure Hunt", "Magic Show", "Circus Fun", "Space Journey", "Ocean Adventure",
];

const FORMAT_COUNT: usize = 6;

/// Generate one display title.
///
/// Draws adjective, character and action first, then the format, so a
/// scripted source maps to titles predictably.
pub fn generate_title<R: RandomSource + ?Sized>(rng: &mut R) -> String {
    let adjective = ADJECTIVES[rng.next_index(ADJECTIVES.len())];
    let character = CHARACTERS[rng.next_index(CHARACTERS.len())];
    let action = ACTIONS[rng.next_index(ACTIONS.len())];

    match rng.next_index(FORMAT_COUNT) {
        0 => format!("{} {} {}", adjective, character, action),
        1 => format!("{}'s {} {}", character, adjective, action),
        2 => format!("The {} {}", adjective, character),
        3 => format!("{} with {}", action, character),
        4 => format!("{} {} Time", adjective, action),
        _ => format!("{} and the {} {}", character, adjective, action),
    }
}
