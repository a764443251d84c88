use chrono::{DateTime, Datelike, Duration, SecondsFormat, Timelike, Utc};

use skywave_core::{HistoricalSample, Quality};

/// The trend series always covers the trailing 24 hours, one sample each.
pub const SERIES_LEN: usize = 24;

// Stream offsets so each field draws from an independent random sequence.
const FIELD_NOISE: u64 = 0;
const FIELD_MUF: u64 = 1;
const FIELD_ABSORPTION: u64 = 2;
const FIELD_KP: u64 = 3;
const FIELD_SFI: u64 = 4;

/// Deterministic value in [0,1) from (seed, sample index, field offset).
/// Splitmix64 finalizer over the mixed inputs; the same seed must reproduce
/// the same series, so no ambient RNG is allowed here.
fn unit(seed: u64, index: u64, field: u64) -> f64 {
    let mut x = seed
        ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ field.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^= x >> 31;
    (x >> 11) as f64 / (1u64 << 53) as f64
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Low-band diurnal baseline for an hour of day (UTC).
fn base_signal(hour: u32) -> f64 {
    if hour >= 19 || hour <= 6 {
        65.0 // night enhancement
    } else if (7..=10).contains(&hour) {
        45.0 // gray line
    } else if (11..=18).contains(&hour) {
        25.0 // day absorption
    } else {
        40.0
    }
}

/// Synthesize the trailing 24-hour trend series ending at `end`, oldest
/// sample first. Fully deterministic in `(seed, end)`.
pub fn generate_historical_series(seed: u64, end: DateTime<Utc>) -> Vec<HistoricalSample> {
    let mut samples = Vec::with_capacity(SERIES_LEN);

    for i in 0..SERIES_LEN {
        let offset_hours = (SERIES_LEN - 1 - i) as i64;
        let t = end - Duration::hours(offset_hours);
        let index = i as u64;

        // Northern-hemisphere winter bonus, November through February.
        let seasonal_bonus = if t.month() >= 11 || t.month() <= 2 {
            10.0
        } else {
            0.0
        };

        let noise = (unit(seed, index, FIELD_NOISE) - 0.5) * 20.0;
        // Quality and SNR derive from the stored (rounded) signal so each
        // sample is self-consistent.
        let signal = (base_signal(t.hour()) + seasonal_bonus + noise)
            .clamp(10.0, 90.0)
            .round();

        let muf = (1.6 + unit(seed, index, FIELD_MUF) * 0.8).clamp(1.5, 3.0);
        let absorption = (2.0 + unit(seed, index, FIELD_ABSORPTION) * 4.0).clamp(1.0, 6.0);
        let kp = (unit(seed, index, FIELD_KP) * 5.0).clamp(0.0, 9.0);
        let sfi = (120.0 + unit(seed, index, FIELD_SFI) * 80.0).clamp(60.0, 300.0);

        let quality = if signal > 60.0 {
            Quality::Excellent
        } else if signal > 40.0 {
            Quality::Good
        } else if signal > 25.0 {
            Quality::Fair
        } else {
            Quality::Poor
        };

        samples.push(HistoricalSample {
            time: t.format("%H:%M").to_string(),
            full_time: t.to_rfc3339_opts(SecondsFormat::Millis, true),
            signal,
            muf: round2(muf),
            absorption: round1(absorption),
            kp: round1(kp),
            sfi: sfi.round(),
            quality,
            snr: ((signal - 30.0) * 0.6).round().max(0.0),
        });
    }

    samples
}

/// Series ending now, seeded from the current time.
pub fn generate_historical_series_now() -> Vec<HistoricalSample> {
    let now = Utc::now();
    generate_historical_series(now.timestamp_millis() as u64, now)
}
