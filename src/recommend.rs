//! Rule-based improvement recommendations.
//!
//! Recommendations are advisory: rule evaluation never fails the request.
//! Inputs that cannot be judged (non-finite numerics) degrade to a single
//! generic suggestion instead.

use log::warn;
use serde::Serialize;

use crate::record::StudentRecord;

/// Expected effect of following a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Impact {
    High,
    Medium,
    Low,
}

/// A single actionable suggestion for a student.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub category: String,
    pub suggestion: String,
    pub impact: Impact,
    /// Rank of the suggestion, 1 = most urgent.
    pub priority: u8,
}

impl Recommendation {
    pub fn new(
        category: impl Into<String>,
        suggestion: impl Into<String>,
        impact: Impact,
        priority: u8,
    ) -> Self {
        Self {
            category: category.into(),
            suggestion: suggestion.into(),
            impact,
            priority,
        }
    }
}

fn general_fallback() -> Recommendation {
    Recommendation::new(
        "General",
        "Maintain consistent study habits and regular attendance",
        Impact::Medium,
        1,
    )
}

/// Produce ranked improvement suggestions for a student and their predicted
/// grade.
///
/// Rules are evaluated in a fixed order and are independent; several may
/// fire for one student. The result is stably sorted by ascending priority,
/// so equal-priority suggestions keep rule order. A missing test-preparation
/// field counts as "none".
pub fn recommend(record: &StudentRecord, predicted_grade: f64) -> Vec<Recommendation> {
    let study_hours = record.study_hours_per_week;
    let attendance = record.attendance_rate;

    if !study_hours.is_finite() || !attendance.is_finite() || !predicted_grade.is_finite() {
        warn!(
            "cannot evaluate recommendation rules \
             (study_hours={study_hours}, attendance={attendance}, grade={predicted_grade})"
        );
        return vec![general_fallback()];
    }

    let mut recommendations = Vec::new();

    // Study time
    if study_hours < 15.0 {
        recommendations.push(Recommendation::new(
            "Study Time",
            format!("Increase study hours from {study_hours} to at least 15-20 hours per week"),
            Impact::High,
            1,
        ));
    } else if study_hours < 25.0 {
        recommendations.push(Recommendation::new(
            "Study Time",
            format!(
                "Consider increasing study hours from {study_hours} to 25-30 hours per week \
                 for better results"
            ),
            Impact::Medium,
            2,
        ));
    }

    // Attendance
    if attendance < 85.0 {
        recommendations.push(Recommendation::new(
            "Attendance",
            format!("Improve attendance from {attendance:.1}% to at least 90%"),
            Impact::High,
            1,
        ));
    } else if attendance < 95.0 {
        recommendations.push(Recommendation::new(
            "Attendance",
            format!("Maintain consistent attendance above 95% (currently {attendance:.1}%)"),
            Impact::Medium,
            2,
        ));
    }

    // Test preparation
    if record.test_preparation_course.as_deref().unwrap_or("none") == "none" {
        recommendations.push(Recommendation::new(
            "Test Preparation",
            "Enroll in test preparation courses to boost performance",
            Impact::High,
            1,
        ));
    }

    // Subject guidance keyed off the predicted grade
    if predicted_grade < 60.0 {
        recommendations.push(Recommendation::new(
            "Mathematics",
            "Focus on fundamental math concepts and practice daily",
            Impact::High,
            1,
        ));
        recommendations.push(Recommendation::new(
            "Study Strategy",
            "Consider getting a tutor or joining study groups",
            Impact::High,
            1,
        ));
    } else if predicted_grade < 75.0 {
        recommendations.push(Recommendation::new(
            "Mathematics",
            "Practice more challenging math problems and review weak areas",
            Impact::Medium,
            2,
        ));
        recommendations.push(Recommendation::new(
            "Study Strategy",
            "Create a structured study schedule and use active learning techniques",
            Impact::Medium,
            2,
        ));
    }

    recommendations.sort_by_key(|r| r.priority);
    recommendations
}
