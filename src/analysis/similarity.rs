use super::profile::StatProfile;

/// Weighted stat-by-stat comparison. Counting stats are normalized against
/// the target's value; percentages compare by absolute difference.
const WEIGHTS: [(&str, f64, bool); 11] = [
    ("PPG", 0.20, true),
    ("RPG", 0.15, true),
    ("APG", 0.15, true),
    ("FG%", 0.15, false),
    ("3P%", 0.10, false),
    ("FT%", 0.05, false),
    ("Paint FG%", 0.05, false),
    ("Mid-Range FG%", 0.05, false),
    ("Corner 3%", 0.05, false),
    ("Clutch FG%", 0.03, false),
    ("Fast Break FG%", 0.02, false),
];

fn weighted_values(profile: &StatProfile) -> [f64; 11] {
    [
        profile.ppg,
        profile.rpg,
        profile.apg,
        profile.fg_pct,
        profile.three_pct,
        profile.ft_pct,
        profile.paint_fg,
        profile.midrange_fg,
        profile.corner_three,
        profile.clutch_fg,
        profile.fast_break_fg,
    ]
}

/// Similarity on a 0-100 scale, one decimal place. Identical profiles
/// score 100.
pub fn similarity_score(player: &StatProfile, target: &StatProfile) -> f64 {
    let player_values = weighted_values(player);
    let target_values = weighted_values(target);

    let mut total_diff = 0.0;
    for (idx, (_, weight, counting)) in WEIGHTS.iter().enumerate() {
        let diff = if *counting {
            (player_values[idx] - target_values[idx]).abs() / target_values[idx].max(1.0)
        } else {
            (player_values[idx] - target_values[idx]).abs()
        };
        total_diff += diff * weight;
    }

    let score = (100.0 - total_diff * 200.0).max(0.0);
    (score * 10.0).round() / 10.0
}

#[derive(Debug, Clone)]
pub struct StatDelta {
    pub label: &'static str,
    pub pct_diff: f64,
}

const CORE_STATS: [(&str, fn(&StatProfile) -> f64); 6] = [
    ("PPG", |p| p.ppg),
    ("RPG", |p| p.rpg),
    ("APG", |p| p.apg),
    ("FG%", |p| p.fg_pct),
    ("3P%", |p| p.three_pct),
    ("FT%", |p| p.ft_pct),
];

/// Core stats where the player beats the target, largest edge first,
/// at most five.
pub fn relative_strengths(player: &StatProfile, target: &StatProfile) -> Vec<StatDelta> {
    deltas(player, target, true)
}

/// Core stats where the player trails the target, largest gap first,
/// at most five.
pub fn relative_weaknesses(player: &StatProfile, target: &StatProfile) -> Vec<StatDelta> {
    deltas(player, target, false)
}

fn deltas(player: &StatProfile, target: &StatProfile, above: bool) -> Vec<StatDelta> {
    let mut out: Vec<StatDelta> = CORE_STATS
        .iter()
        .filter_map(|(label, get)| {
            let p = get(player);
            let t = get(target);
            if t.abs() < f64::EPSILON {
                return None;
            }
            let ahead = p > t;
            if ahead != above || p == t {
                return None;
            }
            Some(StatDelta {
                label,
                pct_diff: ((p - t).abs() / t) * 100.0,
            })
        })
        .collect();
    out.sort_by(|a, b| b.pct_diff.partial_cmp(&a.pct_diff).unwrap_or(std::cmp::Ordering::Equal));
    out.truncate(5);
    out
}

#[derive(Debug, Clone, Copy)]
pub struct Archetype {
    pub name: &'static str,
    pub profile: StatProfile,
}

const fn archetype_profile(
    ppg: f64,
    rpg: f64,
    apg: f64,
    fg_pct: f64,
    three_pct: f64,
    ft_pct: f64,
    paint_fg: f64,
    midrange_fg: f64,
    corner_three: f64,
    clutch_fg: f64,
    fast_break_fg: f64,
) -> StatProfile {
    StatProfile {
        ppg,
        rpg,
        apg,
        fg_pct,
        three_pct,
        ft_pct,
        paint_fg,
        midrange_fg,
        corner_three,
        clutch_fg,
        fast_break_fg,
        games_played: 0.0,
        minutes_per_game: 0.0,
    }
}

pub const ARCHETYPES: [Archetype; 4] = [
    Archetype {
        name: "Elite Scorer",
        profile: archetype_profile(28.0, 5.0, 4.0, 0.480, 0.370, 0.850, 0.600, 0.450, 0.400, 0.460, 0.650),
    },
    Archetype {
        name: "Playmaker",
        profile: archetype_profile(18.0, 5.0, 10.0, 0.450, 0.350, 0.800, 0.550, 0.420, 0.380, 0.440, 0.620),
    },
    Archetype {
        name: "Two-Way Wing",
        profile: archetype_profile(22.0, 7.0, 5.0, 0.470, 0.360, 0.820, 0.580, 0.430, 0.390, 0.450, 0.640),
    },
    Archetype {
        name: "Interior Force",
        profile: archetype_profile(24.0, 12.0, 3.0, 0.560, 0.250, 0.720, 0.680, 0.380, 0.300, 0.520, 0.720),
    },
];

pub fn find_archetype(name: &str) -> Option<&'static Archetype> {
    ARCHETYPES
        .iter()
        .find(|archetype| archetype.name.eq_ignore_ascii_case(name))
}

pub fn archetype_names() -> Vec<&'static str> {
    ARCHETYPES.iter().map(|a| a.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StatProfile {
        StatProfile {
            ppg: 25.3,
            rpg: 7.3,
            apg: 7.4,
            fg_pct: 0.505,
            three_pct: 0.347,
            ft_pct: 0.731,
            paint_fg: 0.612,
            midrange_fg: 0.398,
            corner_three: 0.367,
            clutch_fg: 0.478,
            fast_break_fg: 0.721,
            games_played: 71.0,
            minutes_per_game: 35.3,
        }
    }

    #[test]
    fn identical_profiles_score_100() {
        let profile = sample();
        assert_eq!(similarity_score(&profile, &profile), 100.0);
    }

    #[test]
    fn score_is_symmetric_within_counting_normalization() {
        let player = sample();
        let mut target = sample();
        target.ppg += 2.0;
        let score = similarity_score(&player, &target);
        assert!(score < 100.0);
        assert!(score > 90.0, "small ppg gap should stay a close match, got {}", score);
    }

    #[test]
    fn score_floors_at_zero() {
        let player = StatProfile {
            ppg: 0.0,
            rpg: 0.0,
            apg: 0.0,
            fg_pct: 0.0,
            three_pct: 0.0,
            ft_pct: 0.0,
            paint_fg: 0.0,
            midrange_fg: 0.0,
            corner_three: 0.0,
            clutch_fg: 0.0,
            fast_break_fg: 0.0,
            games_played: 0.0,
            minutes_per_game: 0.0,
        };
        let target = ARCHETYPES[0].profile;
        assert_eq!(similarity_score(&player, &target), 0.0);
    }

    #[test]
    fn known_gap_matches_hand_computed_score() {
        let mut player = sample();
        let target = sample();
        player.fg_pct += 0.10;
        // only the FG% term moves: 0.10 diff * 0.15 weight * 200 = 3.0
        assert_eq!(similarity_score(&player, &target), 97.0);
    }

    #[test]
    fn strengths_and_weaknesses_split_cleanly() {
        let mut player = sample();
        let target = sample();
        player.ppg += 5.0;
        player.ft_pct -= 0.1;

        let strengths = relative_strengths(&player, &target);
        assert_eq!(strengths.len(), 1);
        assert_eq!(strengths[0].label, "PPG");

        let weaknesses = relative_weaknesses(&player, &target);
        assert_eq!(weaknesses.len(), 1);
        assert_eq!(weaknesses[0].label, "FT%");
    }

    #[test]
    fn weights_sum_to_one() {
        let total: f64 = WEIGHTS.iter().map(|(_, w, _)| w).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn archetype_lookup_is_case_insensitive() {
        assert!(find_archetype("elite scorer").is_some());
        assert!(find_archetype("Interior Force").is_some());
        assert!(find_archetype("Rim Runner").is_none());
        assert_eq!(archetype_names().len(), 4);
    }
}
