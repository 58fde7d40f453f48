//! Read models: dashboard, shopping list, writing queue and the archive.

use serde::Serialize;
use std::sync::Arc;

use super::planning_service::PlanningService;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    AnnualSummary, CardPreference, DeliveryStats, GiftIdea, Milestone, Person, Phase, RolloverSummary, TaskType,
};
use crate::domain::ports::{
    EcardDeliveryRepository, GiftIdeaRepository, MilestoneRepository, PersonFilter, PersonRepository,
    SummaryRepository, TaskFilter, TaskRepository,
};

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    /// Set when this call archived a year.
    pub rollover: Option<RolloverSummary>,
    pub active_year: i32,
    pub phase: Phase,
    pub days_until_christmas: i64,
    pub total_people: i64,
    pub people_with_gifts: i64,
    pub handwritten_count: i64,
    pub ecard_count: i64,
    pub total_budget: f64,
    pub milestones: Vec<Milestone>,
    pub current_milestone: Option<Milestone>,
    /// Percentage of the year's milestones completed.
    pub milestone_progress: f64,
    pub gifts_purchased: i64,
    pub cards_written: i64,
    pub gifts_given: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShoppingEntry {
    pub person: Person,
    pub ideas: Vec<GiftIdea>,
    pub purchased: bool,
    pub given: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShoppingList {
    pub year: i32,
    pub entries: Vec<ShoppingEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WritingEntry {
    pub person: Person,
    pub completed: bool,
    pub task_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WritingQueue {
    pub year: i32,
    pub entries: Vec<WritingEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArchiveList {
    pub active_year: i32,
    pub summaries: Vec<AnnualSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GiftRecipient {
    pub person_id: i64,
    pub name: String,
    pub gift: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArchiveDetail {
    pub summary: AnnualSummary,
    pub milestones: Vec<Milestone>,
    pub gift_recipients: Vec<GiftRecipient>,
    pub delivery_stats: DeliveryStats,
}

/// Repositories the read models draw from.
#[derive(Clone)]
pub struct DashboardSources {
    pub people: Arc<dyn PersonRepository>,
    pub ideas: Arc<dyn GiftIdeaRepository>,
    pub tasks: Arc<dyn TaskRepository>,
    pub milestones: Arc<dyn MilestoneRepository>,
    pub summaries: Arc<dyn SummaryRepository>,
    pub deliveries: Arc<dyn EcardDeliveryRepository>,
}

#[derive(Clone)]
pub struct DashboardService {
    planning: PlanningService,
    sources: DashboardSources,
}

impl DashboardService {
    pub fn new(planning: PlanningService, sources: DashboardSources) -> Self {
        Self { planning, sources }
    }

    /// Runs the rollover check first so the snapshot never shows a stale year.
    pub async fn snapshot(&self) -> DomainResult<Dashboard> {
        let rollover = self.planning.check_and_rollover_if_needed().await?;
        let active_year = self.planning.resolve_active_year().await?;
        let phase = self.planning.resolve_current_phase().await?;
        let days_until_christmas = self.planning.days_until_christmas().await?;

        let people = &self.sources.people;
        let total_people = people.count(PersonFilter::active()).await?;
        let people_with_gifts = people.count(PersonFilter { gets_gift: Some(true), ..PersonFilter::active() }).await?;
        let handwritten_count = people
            .count(PersonFilter { card_preference: Some(CardPreference::Handwritten), ..PersonFilter::active() })
            .await?;
        let ecard_count = people
            .count(PersonFilter { card_preference: Some(CardPreference::ECard), ..PersonFilter::active() })
            .await?;
        let total_budget = people.total_gift_budget().await?;

        let milestones = self.sources.milestones.list_for_year(active_year).await?;
        let current_milestone = phase
            .milestone_phase()
            .and_then(|p| milestones.iter().find(|m| m.phase == p).cloned());
        let milestone_progress = if milestones.is_empty() {
            0.0
        } else {
            let done = milestones.iter().filter(|m| m.completed).count();
            done as f64 / milestones.len() as f64 * 100.0
        };

        let tasks = &self.sources.tasks;
        let gifts_purchased = tasks.count(TaskFilter::completed(active_year, TaskType::GiftPurchased)).await?;
        let cards_written = tasks.count(TaskFilter::completed(active_year, TaskType::CardWritten)).await?;
        let gifts_given = tasks.count(TaskFilter::completed(active_year, TaskType::GiftGiven)).await?;

        Ok(Dashboard {
            rollover,
            active_year,
            phase,
            days_until_christmas,
            total_people,
            people_with_gifts,
            handwritten_count,
            ecard_count,
            total_budget,
            milestones,
            current_milestone,
            milestone_progress,
            gifts_purchased,
            cards_written,
            gifts_given,
        })
    }

    /// Gift recipients with their unused ideas and this year's progress.
    pub async fn shopping_list(&self) -> DomainResult<ShoppingList> {
        let year = self.planning.resolve_active_year().await?;
        let recipients = self
            .sources
            .people
            .list(PersonFilter { gets_gift: Some(true), ..PersonFilter::active() })
            .await?;

        let mut entries = Vec::with_capacity(recipients.len());
        for person in recipients {
            let ideas = self.sources.ideas.list_for_person(person.id, true).await?;
            let purchased = self.is_done(person.id, year, TaskType::GiftPurchased).await?;
            let given = self.is_done(person.id, year, TaskType::GiftGiven).await?;
            entries.push(ShoppingEntry { person, ideas, purchased, given });
        }

        Ok(ShoppingList { year, entries })
    }

    /// Everyone who gets a handwritten card, with this year's writing status.
    pub async fn writing_queue(&self) -> DomainResult<WritingQueue> {
        let year = self.planning.resolve_active_year().await?;
        let writers = self
            .sources
            .people
            .list(PersonFilter { card_preference: Some(CardPreference::Handwritten), ..PersonFilter::active() })
            .await?;

        let mut entries = Vec::with_capacity(writers.len());
        for person in writers {
            let task = self.sources.tasks.find(person.id, year, &TaskType::CardWritten).await?;
            entries.push(WritingEntry {
                completed: task.as_ref().is_some_and(|t| t.completed),
                task_id: task.map(|t| t.id),
                person,
            });
        }

        Ok(WritingQueue { year, entries })
    }

    pub async fn archive_list(&self) -> DomainResult<ArchiveList> {
        Ok(ArchiveList {
            active_year: self.planning.resolve_active_year().await?,
            summaries: self.sources.summaries.list().await?,
        })
    }

    pub async fn archive_detail(&self, year: i32) -> DomainResult<ArchiveDetail> {
        let summary = self.sources.summaries.get(year).await?.ok_or(DomainError::SummaryNotFound(year))?;
        let milestones = self.sources.milestones.list_for_year(year).await?;

        let gift_tasks = self.sources.tasks.list(TaskFilter::completed(year, TaskType::GiftGiven)).await?;
        let mut gift_recipients = Vec::new();
        for task in gift_tasks {
            let Some(person_id) = task.person_id else { continue };
            let Some(person) = self.sources.people.get(person_id).await? else { continue };
            gift_recipients.push(GiftRecipient {
                person_id,
                name: person.name,
                gift: task.actual_gift.unwrap_or_else(|| "No details recorded".to_string()),
            });
        }

        let delivery_stats = self.sources.deliveries.stats_for_year(year).await?;

        Ok(ArchiveDetail {
            summary,
            milestones,
            gift_recipients,
            delivery_stats,
        })
    }

    async fn is_done(&self, person_id: i64, year: i32, task_type: TaskType) -> DomainResult<bool> {
        Ok(self
            .sources
            .tasks
            .find(person_id, year, &task_type)
            .await?
            .is_some_and(|t| t.completed))
    }
}
