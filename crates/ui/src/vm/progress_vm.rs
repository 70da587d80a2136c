use progress_core::Clock;
use progress_core::model::{ResourceProgress, UserResourceProgressDocument};

use crate::i18n::Translations;
use crate::vm::time_fmt::{format_datetime, format_relative};

/// UI-ready representation of an activity progress card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceProgressVm {
    pub title: String,
    pub href: String,
    pub percentage: u8,
    pub bar_style: String,
    pub updated_label: String,
    pub updated_at_str: String,
    /// Non-zero status counts, e.g. "3 done", in display order.
    pub segments: Vec<String>,
    pub total_label: String,
}

#[must_use]
pub fn map_resource_progress(
    progress: &ResourceProgress,
    translations: &Translations,
    clock: &Clock,
) -> ResourceProgressVm {
    let percentage = progress.progress_percentage();

    let mut segments = Vec::with_capacity(3);
    if progress.done_count > 0 {
        segments.push(count_label(
            progress.done_count,
            translations.t("done").map(str::to_owned),
        ));
    }
    if progress.learning_count > 0 {
        segments.push(count_label(
            progress.learning_count,
            translations.t_lower("inProgress"),
        ));
    }
    if progress.skipped_count > 0 {
        segments.push(count_label(
            progress.skipped_count,
            translations.t_lower("skipped"),
        ));
    }

    ResourceProgressVm {
        title: progress.title.clone(),
        href: progress.resource().resource_path(),
        percentage,
        bar_style: format!("width: {percentage}%"),
        updated_label: format_relative(clock, progress.updated_at),
        updated_at_str: format_datetime(progress.updated_at),
        segments,
        total_label: count_label(progress.total_count, translations.t_lower("total")),
    }
}

fn count_label(count: u32, label: Option<String>) -> String {
    match label {
        Some(label) => format!("{count} {label}"),
        None => count.to_string(),
    }
}

/// Labels of the clear control. Missing translations render as empty text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClearLabels {
    pub clear: String,
    pub are_you_sure: String,
    pub yes: String,
    pub no: String,
    pub processing: String,
}

impl ClearLabels {
    #[must_use]
    pub fn from_translations(translations: &Translations) -> Self {
        let label = |key: &str| translations.t(key).unwrap_or_default().to_owned();
        Self {
            clear: label("clearProgress"),
            are_you_sure: label("areYouSure"),
            yes: label("yes"),
            no: label("no"),
            processing: label("processing"),
        }
    }
}

/// UI-ready representation of a learning-dashboard card.
#[derive(Clone, Debug, PartialEq)]
pub struct LearningProgressVm {
    pub title: String,
    pub href: String,
    pub fraction_label: String,
    pub bar_style: String,
    pub updated_label: String,
}

#[must_use]
pub fn map_learning_progress(
    document: &UserResourceProgressDocument,
    clock: &Clock,
) -> LearningProgressVm {
    LearningProgressVm {
        title: document.title.clone(),
        href: document.resource().resource_path(),
        fraction_label: format!("{} / {}", document.done_count(), document.total_group_count),
        bar_style: format!("width: {}%", document.bar_width_percent()),
        updated_label: format_relative(clock, document.updated_at),
    }
}
