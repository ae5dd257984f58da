//! Hand evaluation.
//!
//! Rules are checked best first and the first match wins:
//! five of a kind, four of a kind, full house, six-high straight,
//! five-high straight, three of a kind, two pairs, pair, nothing.

use lifedice_types::dice::{Category, Face, Hand, DICE_COUNT, FACE_COUNT};

/// Evaluate five faces. Total over all 6^5 hands and free of allocations.
pub fn evaluate(faces: &[Face; DICE_COUNT]) -> Category {
    // counts[i] = how many dice show face i + 1
    let mut counts = [0u8; FACE_COUNT];
    for face in faces {
        counts[face.index()] += 1;
    }

    let has = |n: u8| counts.iter().any(|&count| count == n);
    let pairs = counts.iter().filter(|&&count| count == 2).count();

    if has(5) {
        Category::FiveOfAKind
    } else if has(4) {
        Category::FourOfAKind
    } else if has(3) && has(2) {
        Category::FullHouse
    } else if counts[1..].iter().all(|&count| count == 1) {
        // 2-3-4-5-6, no ace
        Category::SixHighStraight
    } else if counts[..FACE_COUNT - 1].iter().all(|&count| count == 1) {
        // 1-2-3-4-5, no six
        Category::FiveHighStraight
    } else if has(3) {
        Category::ThreeOfAKind
    } else if pairs == 2 {
        Category::TwoPairs
    } else if pairs == 1 {
        Category::Pair
    } else {
        Category::Nothing
    }
}

/// Evaluate a hand, or `None` while any die is unrolled.
pub fn evaluate_hand(hand: &Hand) -> Option<Category> {
    hand.faces().map(|faces| evaluate(&faces))
}
