use crate::api::models::ShotChartRow;
use std::collections::HashMap;

/// Half-court partition used for zone efficiency. Boundaries are in feet
/// from the basket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Paint,
    CloseRange,
    LeftBaselineMid,
    RightBaselineMid,
    MidRangeCenter,
    LeftMidRange,
    RightMidRange,
    TopOfKey,
    LeftCorner3,
    RightCorner3,
    LeftWing3,
    RightWing3,
    TopOfArc3,
}

impl Zone {
    pub fn label(&self) -> &'static str {
        match self {
            Zone::Paint => "Paint",
            Zone::CloseRange => "Close Range",
            Zone::LeftBaselineMid => "Left Baseline Mid",
            Zone::RightBaselineMid => "Right Baseline Mid",
            Zone::MidRangeCenter => "Mid-Range Center",
            Zone::LeftMidRange => "Left Mid-Range",
            Zone::RightMidRange => "Right Mid-Range",
            Zone::TopOfKey => "Top of Key",
            Zone::LeftCorner3 => "Left Corner 3",
            Zone::RightCorner3 => "Right Corner 3",
            Zone::LeftWing3 => "Left Wing 3",
            Zone::RightWing3 => "Right Wing 3",
            Zone::TopOfArc3 => "Top of Arc 3",
        }
    }
}

/// Classify one attempt. Shot-chart coordinates arrive in tenth-feet;
/// anything beyond |100| is converted down.
pub fn classify(loc_x: f64, loc_y: f64, distance: f64) -> Zone {
    let x = if loc_x.abs() > 100.0 { loc_x / 10.0 } else { loc_x };
    let y = if loc_y.abs() > 100.0 { loc_y / 10.0 } else { loc_y };

    if distance <= 8.0 {
        if x.abs() <= 8.0 && y <= 19.0 {
            Zone::Paint
        } else {
            Zone::CloseRange
        }
    } else if distance <= 16.0 {
        if y <= 14.0 {
            if x < -8.0 {
                Zone::LeftBaselineMid
            } else if x > 8.0 {
                Zone::RightBaselineMid
            } else {
                Zone::MidRangeCenter
            }
        } else if x < -6.0 {
            Zone::LeftMidRange
        } else if x > 6.0 {
            Zone::RightMidRange
        } else {
            Zone::TopOfKey
        }
    } else if x.abs() > 22.0 && y <= 14.0 {
        if x < 0.0 {
            Zone::LeftCorner3
        } else {
            Zone::RightCorner3
        }
    } else if y > 14.0 && y <= 26.0 {
        if x < 0.0 {
            Zone::LeftWing3
        } else {
            Zone::RightWing3
        }
    } else {
        Zone::TopOfArc3
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EfficiencyRating {
    Elite,
    Good,
    Average,
    Poor,
}

impl EfficiencyRating {
    pub fn from_pct(fg_pct: f64) -> Self {
        if fg_pct >= 0.50 {
            EfficiencyRating::Elite
        } else if fg_pct >= 0.40 {
            EfficiencyRating::Good
        } else if fg_pct >= 0.30 {
            EfficiencyRating::Average
        } else {
            EfficiencyRating::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EfficiencyRating::Elite => "Elite",
            EfficiencyRating::Good => "Good",
            EfficiencyRating::Average => "Average",
            EfficiencyRating::Poor => "Poor",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ZoneSummary {
    pub zone: Zone,
    pub attempts: usize,
    pub makes: usize,
}

impl ZoneSummary {
    pub fn fg_pct(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.makes as f64 / self.attempts as f64
        }
    }

    pub fn rating(&self) -> EfficiencyRating {
        EfficiencyRating::from_pct(self.fg_pct())
    }
}

/// Per-zone shooting summary, busiest zones first.
pub fn summarize(shots: &[ShotChartRow]) -> Vec<ZoneSummary> {
    let mut by_zone: HashMap<Zone, (usize, usize)> = HashMap::new();
    for shot in shots {
        let entry = by_zone
            .entry(classify(shot.loc_x, shot.loc_y, shot.shot_distance))
            .or_insert((0, 0));
        entry.0 += 1;
        if shot.made {
            entry.1 += 1;
        }
    }

    let mut summaries: Vec<ZoneSummary> = by_zone
        .into_iter()
        .map(|(zone, (attempts, makes))| ZoneSummary { zone, attempts, makes })
        .collect();
    summaries.sort_by(|a, b| b.attempts.cmp(&a.attempts));
    summaries
}

const MIN_ZONE_ATTEMPTS: usize = 10;

#[derive(Debug, Clone)]
pub struct ShotInsights {
    pub total_shots: usize,
    pub overall_fg_pct: f64,
    pub avg_distance: f64,
    pub three_point_attempts: usize,
    pub three_point_pct: f64,
    pub two_point_attempts: usize,
    pub two_point_pct: f64,
    pub close_shot_frequency: f64,
    pub close_shot_pct: f64,
    pub best_zone: Option<(Zone, f64)>,
}

pub fn analyze(shots: &[ShotChartRow]) -> Option<ShotInsights> {
    if shots.is_empty() {
        return None;
    }

    let total = shots.len();
    let makes = shots.iter().filter(|s| s.made).count();
    let avg_distance = shots.iter().map(|s| s.shot_distance).sum::<f64>() / total as f64;

    let threes: Vec<_> = shots.iter().filter(|s| s.shot_type == "3PT Field Goal").collect();
    let twos: Vec<_> = shots.iter().filter(|s| s.shot_type == "2PT Field Goal").collect();
    let close: Vec<_> = shots.iter().filter(|s| s.shot_distance <= 8.0).collect();

    let pct = |made: usize, attempted: usize| {
        if attempted == 0 {
            0.0
        } else {
            made as f64 / attempted as f64
        }
    };

    let best_zone = summarize(shots)
        .into_iter()
        .filter(|summary| summary.attempts >= MIN_ZONE_ATTEMPTS)
        .max_by(|a, b| a.fg_pct().partial_cmp(&b.fg_pct()).unwrap_or(std::cmp::Ordering::Equal))
        .map(|summary| (summary.zone, summary.fg_pct()));

    Some(ShotInsights {
        total_shots: total,
        overall_fg_pct: pct(makes, total),
        avg_distance,
        three_point_attempts: threes.len(),
        three_point_pct: pct(threes.iter().filter(|s| s.made).count(), threes.len()),
        two_point_attempts: twos.len(),
        two_point_pct: pct(twos.iter().filter(|s| s.made).count(), twos.len()),
        close_shot_frequency: close.len() as f64 / total as f64,
        close_shot_pct: pct(close.iter().filter(|s| s.made).count(), close.len()),
        best_zone,
    })
}

/// Short tendency read-outs for the terminal summary.
pub fn tendency_labels(insights: &ShotInsights) -> Vec<&'static str> {
    let mut labels = Vec::new();

    if insights.avg_distance > 18.0 {
        labels.push("Perimeter-oriented shooter");
    } else if insights.avg_distance < 12.0 {
        labels.push("Paint-focused player");
    } else {
        labels.push("Balanced shot selection");
    }

    if insights.close_shot_frequency > 0.4 {
        labels.push("High close-range frequency");
    } else if insights.close_shot_frequency < 0.2 {
        labels.push("Limited paint presence");
    }

    if insights.three_point_pct > 0.37 {
        labels.push("Elite 3-point shooter");
    } else if insights.three_point_pct > 0.33 {
        labels.push("Good 3-point shooter");
    }

    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shot(x: f64, y: f64, distance: f64, made: bool, shot_type: &str) -> ShotChartRow {
        ShotChartRow {
            loc_x: x,
            loc_y: y,
            shot_distance: distance,
            made,
            shot_type: shot_type.to_string(),
            action_type: "Jump Shot".to_string(),
        }
    }

    #[test]
    fn classifies_known_spots() {
        assert_eq!(classify(0.0, 5.0, 2.0), Zone::Paint);
        assert_eq!(classify(10.0, 2.0, 7.0), Zone::CloseRange);
        assert_eq!(classify(-12.0, 6.0, 13.0), Zone::LeftBaselineMid);
        assert_eq!(classify(12.0, 6.0, 13.0), Zone::RightBaselineMid);
        assert_eq!(classify(0.0, 12.0, 12.0), Zone::MidRangeCenter);
        assert_eq!(classify(-10.0, 16.0, 15.0), Zone::LeftMidRange);
        assert_eq!(classify(0.0, 17.0, 16.0), Zone::TopOfKey);
        assert_eq!(classify(-23.5, 2.0, 22.0), Zone::LeftCorner3);
        assert_eq!(classify(23.5, 2.0, 22.0), Zone::RightCorner3);
        assert_eq!(classify(-16.0, 20.0, 25.0), Zone::LeftWing3);
        assert_eq!(classify(16.0, 20.0, 25.0), Zone::RightWing3);
        assert_eq!(classify(0.0, 28.0, 27.0), Zone::TopOfArc3);
    }

    #[test]
    fn tenth_feet_coordinates_are_converted() {
        // -235 tenth-feet = -23.5 ft, a left corner three
        assert_eq!(classify(-235.0, 10.0, 23.0), Zone::LeftCorner3);
    }

    #[test]
    fn summary_counts_and_orders_by_attempts() {
        let shots = vec![
            shot(0.0, 5.0, 2.0, true, "2PT Field Goal"),
            shot(1.0, 6.0, 3.0, false, "2PT Field Goal"),
            shot(2.0, 4.0, 2.0, true, "2PT Field Goal"),
            shot(-235.0, 10.0, 23.0, true, "3PT Field Goal"),
        ];
        let summary = summarize(&shots);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].zone, Zone::Paint);
        assert_eq!(summary[0].attempts, 3);
        assert_eq!(summary[0].makes, 2);
        assert_eq!(summary[1].zone, Zone::LeftCorner3);
    }

    #[test]
    fn rating_bands() {
        assert_eq!(EfficiencyRating::from_pct(0.55), EfficiencyRating::Elite);
        assert_eq!(EfficiencyRating::from_pct(0.50), EfficiencyRating::Elite);
        assert_eq!(EfficiencyRating::from_pct(0.45), EfficiencyRating::Good);
        assert_eq!(EfficiencyRating::from_pct(0.35), EfficiencyRating::Average);
        assert_eq!(EfficiencyRating::from_pct(0.25), EfficiencyRating::Poor);
    }

    #[test]
    fn insights_split_twos_and_threes() {
        let mut shots = Vec::new();
        for i in 0..10 {
            shots.push(shot(0.0, 5.0, 2.0, i % 2 == 0, "2PT Field Goal"));
        }
        for _ in 0..5 {
            shots.push(shot(0.0, 28.0, 27.0, false, "3PT Field Goal"));
        }
        let insights = analyze(&shots).unwrap();
        assert_eq!(insights.total_shots, 15);
        assert_eq!(insights.two_point_attempts, 10);
        assert_eq!(insights.three_point_attempts, 5);
        assert_eq!(insights.three_point_pct, 0.0);
        assert!((insights.two_point_pct - 0.5).abs() < 1e-9);
        assert!((insights.close_shot_frequency - 10.0 / 15.0).abs() < 1e-9);
        // Paint is the only zone with 10+ attempts
        let (zone, pct) = insights.best_zone.unwrap();
        assert_eq!(zone, Zone::Paint);
        assert!((pct - 0.5).abs() < 1e-9);
    }

    #[test]
    fn no_shots_means_no_insights() {
        assert!(analyze(&[]).is_none());
    }

    #[test]
    fn thin_zones_produce_no_best_zone() {
        let shots = vec![shot(0.0, 5.0, 2.0, true, "2PT Field Goal")];
        let insights = analyze(&shots).unwrap();
        assert!(insights.best_zone.is_none());
    }

    #[test]
    fn tendencies_for_a_paint_heavy_profile() {
        let shots: Vec<_> = (0..20).map(|i| shot(0.0, 5.0, 3.0, i % 3 == 0, "2PT Field Goal")).collect();
        let insights = analyze(&shots).unwrap();
        let labels = tendency_labels(&insights);
        assert!(labels.contains(&"Paint-focused player"));
        assert!(labels.contains(&"High close-range frequency"));
    }
}
