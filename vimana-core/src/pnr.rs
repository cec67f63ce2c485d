use rand::Rng;

const PNR_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const PNR_LENGTH: usize = 6;

/// Generate a 6-character PNR-style booking reference drawn uniformly
/// from `[A-Z0-9]`. No reuse check; the identifier space dwarfs a
/// fixed inventory of a few dozen seats.
pub fn generate_booking_id() -> String {
    let mut rng = rand::thread_rng();
    (0..PNR_LENGTH)
        .map(|_| PNR_ALPHABET[rng.gen_range(0..PNR_ALPHABET.len())] as char)
        .collect()
}
