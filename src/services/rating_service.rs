use crate::config::ChallengeSettings;

/// Average time at or below which gains are not reduced.
const PACE_FULL_CREDIT_SECONDS: f64 = 5.0;
/// Average time at or above which gains are halved.
const PACE_HALF_CREDIT_SECONDS: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingInput {
    pub current_rating: i64,
    /// Session accuracy in percent.
    pub accuracy: f64,
    pub average_time: f64,
    pub opponent_rating: i64,
    pub is_guest: bool,
}

/// ELO-style update driven by session accuracy against a 50% baseline.
///
/// The base swing is `K * (accuracy / 100 - 0.5)`. Gains are weighted by `2 * (1 - E)` and by
/// the pace factor, losses by `2 * E`, where `E` is the expected score against the opponent
/// rating. Both weights equal 1 for an evenly matched, fast session. The result is rounded and
/// never exceeds `K` in magnitude.
#[derive(Debug, Clone)]
pub struct RatingEngine {
    k_factor: f64,
    default_rating: i64,
    opponent_rating: i64,
}

impl RatingEngine {
    pub fn new(settings: &ChallengeSettings) -> Self {
        RatingEngine {
            k_factor: settings.k_factor,
            default_rating: settings.default_rating,
            opponent_rating: settings.opponent_rating,
        }
    }

    pub fn default_rating(&self) -> i64 {
        self.default_rating
    }

    pub fn opponent_rating(&self) -> i64 {
        self.opponent_rating
    }

    pub fn k_factor(&self) -> f64 {
        self.k_factor
    }

    pub fn expected_score(rating: i64, opponent_rating: i64) -> f64 {
        1.0 / (1.0 + 10f64.powf((opponent_rating - rating) as f64 / 400.0))
    }

    pub fn pace_factor(average_time: f64) -> f64 {
        if !average_time.is_finite() || average_time >= PACE_HALF_CREDIT_SECONDS {
            return 0.5;
        }
        if average_time <= PACE_FULL_CREDIT_SECONDS {
            return 1.0;
        }
        let progress = (average_time - PACE_FULL_CREDIT_SECONDS)
            / (PACE_HALF_CREDIT_SECONDS - PACE_FULL_CREDIT_SECONDS);
        1.0 - 0.5 * progress
    }

    pub fn delta(&self, input: &RatingInput) -> i64 {
        let accuracy = if input.accuracy.is_finite() {
            input.accuracy.clamp(0.0, 100.0)
        } else {
            0.0
        };
        let performance = accuracy / 100.0 - 0.5;
        if performance == 0.0 {
            return 0;
        }

        let expected = Self::expected_score(input.current_rating, input.opponent_rating);
        let weight = if performance > 0.0 {
            2.0 * (1.0 - expected) * Self::pace_factor(input.average_time)
        } else {
            2.0 * expected
        };

        let delta = (self.k_factor * performance * weight)
            .round()
            .clamp(-self.k_factor, self.k_factor) as i64;

        log::trace!(
            "rating delta {} (rating {}, accuracy {:.1}, avg {:.2}s, guest {})",
            delta,
            input.current_rating,
            accuracy,
            input.average_time,
            input.is_guest
        );

        delta
    }

    /// Ratings never drop below zero.
    pub fn apply(current_rating: i64, delta: i64) -> i64 {
        current_rating.saturating_add(delta).max(0)
    }
}

/// Maps a rating onto an approximate global rank with a logistic percentile model.
#[derive(Debug, Clone)]
pub struct RankEstimator {
    mean_rating: f64,
    scale: f64,
    min_total_players: u64,
}

impl RankEstimator {
    pub fn new(settings: &ChallengeSettings) -> Self {
        RankEstimator {
            mean_rating: settings.rank_mean_rating,
            scale: settings.rank_scale,
            min_total_players: settings.min_total_players,
        }
    }

    /// Population used for ranking: the known players, padded to the configured minimum.
    pub fn total_players(&self, known_players: Option<u64>) -> u64 {
        known_players
            .unwrap_or(0)
            .max(self.min_total_players)
            .max(1)
    }

    /// Share of the population rated below `rating`.
    pub fn percentile(&self, rating: i64) -> f64 {
        1.0 / (1.0 + (-(rating as f64 - self.mean_rating) / self.scale).exp())
    }

    pub fn rank(&self, rating: i64, total_players: u64) -> u64 {
        let total = total_players.max(1);
        let above = ((1.0 - self.percentile(rating)) * total as f64).ceil();
        (above as u64).clamp(1, total)
    }
}
