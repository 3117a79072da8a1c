//! Lifestyle inputs captured by the dashboard sliders.

use serde::{Deserialize, Serialize};

/// Number of lifestyle features the model is fitted on.
pub const FEATURE_COUNT: usize = 7;

/// Feature names in model order.
///
/// Order is the column order of the design matrix: sleep, mindfulness,
/// hydration, stress, physical activity, alcohol, smoking.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "sleep_hours",
    "mindfulness_minutes",
    "hydration_litres",
    "stress_level",
    "physical_activity_minutes",
    "alcohol_units",
    "smoking_cigarettes",
];

/// One user's lifestyle metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifestyleInput {
    /// Hours of sleep per night
    pub sleep_hours: f64,

    /// Minutes of mindfulness practice per day
    pub mindfulness_minutes: f64,

    /// Litres of water per day
    pub hydration_litres: f64,

    /// Self-reported stress, 0 (none) to 10
    pub stress_level: f64,

    /// Minutes of physical activity per day
    pub physical_activity_minutes: f64,

    /// Units of alcohol per week
    pub alcohol_units: f64,

    /// Cigarettes per day
    pub smoking_cigarettes: f64,
}

impl Default for LifestyleInput {
    fn default() -> Self {
        let mut input = Self {
            sleep_hours: 0.0,
            mindfulness_minutes: 0.0,
            hydration_litres: 0.0,
            stress_level: 0.0,
            physical_activity_minutes: 0.0,
            alcohol_units: 0.0,
            smoking_cigarettes: 0.0,
        };
        for spec in &SLIDERS {
            input.set(spec.feature, spec.default);
        }
        input
    }
}

/// Identifies one of the seven features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    SleepHours,
    MindfulnessMinutes,
    HydrationLitres,
    StressLevel,
    PhysicalActivityMinutes,
    AlcoholUnits,
    SmokingCigarettes,
}

impl LifestyleInput {
    /// Convert to a feature row for the model.
    /// Order matches `FEATURE_NAMES`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        vec![
            self.sleep_hours,
            self.mindfulness_minutes,
            self.hydration_litres,
            self.stress_level,
            self.physical_activity_minutes,
            self.alcohol_units,
            self.smoking_cigarettes,
        ]
    }

    /// Create an input from a feature row.
    ///
    /// # Errors
    /// Returns error if the row length is not `FEATURE_COUNT`.
    pub fn from_vec(v: &[f64]) -> Result<Self, String> {
        if v.len() != FEATURE_COUNT {
            return Err(format!(
                "Expected {FEATURE_COUNT} features, got {}",
                v.len()
            ));
        }

        Ok(Self {
            sleep_hours: v[0],
            mindfulness_minutes: v[1],
            hydration_litres: v[2],
            stress_level: v[3],
            physical_activity_minutes: v[4],
            alcohol_units: v[5],
            smoking_cigarettes: v[6],
        })
    }

    #[must_use]
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::SleepHours => self.sleep_hours,
            Feature::MindfulnessMinutes => self.mindfulness_minutes,
            Feature::HydrationLitres => self.hydration_litres,
            Feature::StressLevel => self.stress_level,
            Feature::PhysicalActivityMinutes => self.physical_activity_minutes,
            Feature::AlcoholUnits => self.alcohol_units,
            Feature::SmokingCigarettes => self.smoking_cigarettes,
        }
    }

    pub fn set(&mut self, feature: Feature, value: f64) {
        let slot = match feature {
            Feature::SleepHours => &mut self.sleep_hours,
            Feature::MindfulnessMinutes => &mut self.mindfulness_minutes,
            Feature::HydrationLitres => &mut self.hydration_litres,
            Feature::StressLevel => &mut self.stress_level,
            Feature::PhysicalActivityMinutes => &mut self.physical_activity_minutes,
            Feature::AlcoholUnits => &mut self.alcohol_units,
            Feature::SmokingCigarettes => &mut self.smoking_cigarettes,
        };
        *slot = value;
    }

    /// Whether every value lies within its slider range.
    #[must_use]
    pub fn within_bounds(&self) -> bool {
        SLIDERS
            .iter()
            .all(|spec| (spec.min..=spec.max).contains(&self.get(spec.feature)))
    }
}

/// Range, default and step of one slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderSpec {
    pub feature: Feature,
    pub label: &'static str,
    pub prompt: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
    /// Digits shown after the decimal point
    pub decimals: usize,
}

impl SliderSpec {
    /// Clamp a value into range and snap it onto the step grid.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.default;
        }
        let steps = ((value - self.min) / self.step).round();
        let snapped = self.min + steps * self.step;
        let factor = 10f64.powi(self.decimals as i32);
        ((snapped * factor).round() / factor).clamp(self.min, self.max)
    }

    /// Move `value` by `steps` increments, staying in range.
    #[must_use]
    pub fn step_by(&self, value: f64, steps: i32) -> f64 {
        self.clamp(value + f64::from(steps) * self.step)
    }

    /// Render a value at this slider's precision.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        format!("{value:.prec$}", prec = self.decimals)
    }

    /// Position of `value` in the range as a 0..=1 ratio.
    #[must_use]
    pub fn ratio(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// The seven lifestyle sliders, in model order.
pub const SLIDERS: [SliderSpec; FEATURE_COUNT] = [
    SliderSpec {
        feature: Feature::SleepHours,
        label: "Sleep",
        prompt: "How many hours of sleep do you get normally?",
        min: 0.0,
        max: 10.0,
        default: 5.0,
        step: 1.0,
        decimals: 0,
    },
    SliderSpec {
        feature: Feature::MindfulnessMinutes,
        label: "Mindfulness",
        prompt: "How many minutes of mindfulness do you practice a day?",
        min: 0.0,
        max: 60.0,
        default: 30.0,
        step: 1.0,
        decimals: 0,
    },
    SliderSpec {
        feature: Feature::HydrationLitres,
        label: "Hydration",
        prompt: "How many litres of water do you drink a day?",
        min: 0.5,
        max: 5.0,
        default: 1.0,
        step: 0.1,
        decimals: 1,
    },
    SliderSpec {
        feature: Feature::StressLevel,
        label: "Stress",
        prompt: "How stressed do you feel, from 0 to 10?",
        min: 0.0,
        max: 10.0,
        default: 1.0,
        step: 1.0,
        decimals: 0,
    },
    SliderSpec {
        feature: Feature::PhysicalActivityMinutes,
        label: "Physical activity",
        prompt: "How many minutes of exercise do you do a day?",
        min: 0.0,
        max: 120.0,
        default: 10.0,
        step: 1.0,
        decimals: 0,
    },
    SliderSpec {
        feature: Feature::AlcoholUnits,
        label: "Alcohol",
        prompt: "How many units of alcohol do you drink a week?",
        min: 0.0,
        max: 20.0,
        default: 5.0,
        step: 1.0,
        decimals: 0,
    },
    SliderSpec {
        feature: Feature::SmokingCigarettes,
        label: "Smoking",
        prompt: "How many cigarettes do you smoke a day?",
        min: 0.0,
        max: 30.0,
        default: 1.0,
        step: 1.0,
        decimals: 0,
    },
];

/// Look up the slider for a feature.
#[must_use]
pub fn slider(feature: Feature) -> &'static SliderSpec {
    SLIDERS
        .iter()
        .find(|spec| spec.feature == feature)
        .unwrap_or(&SLIDERS[0])
}
