use super::GestureSymbol;
use crate::{
    config::ClassifierConfig,
    landmarks::{Finger, HandLandmarks},
};
use log::trace;

/// Classify a single hand. Rules are evaluated in priority order so that
/// similar poses resolve to exactly one symbol; `wave` is never produced here.
pub fn classify(hand: &HandLandmarks, config: &ClassifierConfig) -> GestureSymbol {
    let fingers = hand.finger_states();
    let thumb_index = hand.thumb_index_distance();

    let curled_tail = !fingers.is_extended(Finger::Middle)
        && !fingers.is_extended(Finger::Ring)
        && !fingers.is_extended(Finger::Pinky);

    let symbol = if thumb_index < config.ok_threshold && curled_tail {
        GestureSymbol::Ok
    } else if fingers.extended_count() == 0 {
        // thumb_index >= ok_threshold is implied: a closed circle already matched `ok`
        GestureSymbol::Fist
    } else if fingers.only(&[Finger::Index, Finger::Middle])
        && hand.index_middle_distance() > config.peace_min_separation
    {
        GestureSymbol::Peace
    } else if fingers.only(&[Finger::Index]) {
        GestureSymbol::Point
    } else if fingers.only(&[Finger::Thumb]) {
        GestureSymbol::ThumbsUp
    } else {
        GestureSymbol::None
    };

    trace!(
        "landmarks -> {} (extended {:?}, thumb-index {:.3})",
        symbol,
        fingers.0,
        thumb_index
    );
    symbol
}
