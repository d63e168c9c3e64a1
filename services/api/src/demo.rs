use crate::infra::{
    onboarding_quiz, InMemoryAttemptRepository, InMemoryCreatorRepository,
    InMemoryQuizRepository, DEMO_MANAGER, ONBOARDING_QUIZ,
};
use clap::Args;
use creator_hub::bonus::{BonusEngine, CreatorMetrics, RawCreatorMetrics, TierResult, TierTable};
use creator_hub::config::AppConfig;
use creator_hub::creators::{
    derive_stats_with, CreatorHandle, CreatorInsightsService, CreatorRecord, CreatorStats,
    ManagerId,
};
use creator_hub::error::AppError;
use creator_hub::learning::{
    AnswerId, ChallengeDayRecord, ChallengeProgress, QuizId, QuizQuestion, QuizService,
    SubmittedAnswers, CHALLENGE_LENGTH_DAYS,
};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct BonusArgs {
    /// Valid live days in the period
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) days: i64,
    /// Live hours in the period; partial hours are dropped
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) hours: f64,
    /// Diamonds earned in the period
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) diamonds: i64,
    /// CSV tier table to use instead of the configured one
    #[arg(long)]
    pub(crate) tiers: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct StatsArgs {
    /// Path to a creator record exported as JSON
    #[arg(long)]
    pub(crate) record: PathBuf,
}

pub(crate) fn run_bonus(args: BonusArgs) -> Result<(), AppError> {
    let BonusArgs {
        days,
        hours,
        diamonds,
        tiers,
    } = args;

    let table = match tiers {
        Some(path) => TierTable::from_path(path)?,
        None => AppConfig::load()?.bonus.tier_table()?,
    };
    let engine = BonusEngine::new(table);
    let metrics = CreatorMetrics::from(RawCreatorMetrics {
        days_streamed: days,
        hours_streamed: hours,
        diamonds_earned: diamonds,
    });

    println!(
        "Bonus check: {} days | {} hours | {} diamonds",
        metrics.days_streamed, metrics.hours_streamed, metrics.diamonds_earned
    );
    render_tier(&engine.classify(&metrics));
    Ok(())
}

pub(crate) fn run_stats(args: StatsArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let reader = BufReader::new(File::open(&args.record)?);
    let record: CreatorRecord = serde_json::from_reader(reader)?;

    let stats = derive_stats_with(&record, &config.bonus.targets);
    let engine = BonusEngine::new(config.bonus.tier_table()?);

    println!("{} (@{})", record.display_name(), record.creator_handle);
    render_stats(&stats);
    render_tier(&engine.classify(&stats.metrics()));
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    println!("Creator hub demo");

    let creators = CreatorInsightsService::new(
        Arc::new(InMemoryCreatorRepository::seeded()),
        BonusEngine::default(),
        Default::default(),
    );

    println!("\nBonus tiers (highest first)");
    for tier in creators.tiers().tiers() {
        println!(
            "- {}: {}+ days, {}+ hours, {}–{} diamonds -> ${}–${}",
            tier.name,
            tier.min_days,
            tier.min_hours,
            tier.min_diamonds,
            tier.max_diamonds,
            tier.min_payout,
            tier.max_payout
        );
    }

    let manager = ManagerId(DEMO_MANAGER.to_string());
    let roster = match creators.roster(&manager) {
        Ok(roster) => roster,
        Err(err) => {
            println!("  Roster unavailable: {}", err);
            return Ok(());
        }
    };
    println!("\nRoster for {}", manager);
    println!(
        "- {} creators | {} rookies | {} graduated | {} diamonds this month",
        roster.summary.total_creators,
        roster.summary.total_rookies,
        roster.summary.total_graduated,
        roster.summary.collective_diamonds
    );

    for entry in &roster.creators {
        match creators.dashboard(&entry.creator_handle) {
            Ok(dashboard) => println!(
                "  - {} ({}): {} | {:.0}% to {}",
                dashboard.display_name,
                entry.stage.label(),
                dashboard.tier.summary(),
                dashboard.stats.current_progress_percent,
                dashboard.stats.next_target
            ),
            Err(err) => println!("  - {}: {}", entry.creator_handle, err),
        }
    }

    println!("\nOnboarding quiz");
    let quizzes = QuizService::new(
        Arc::new(InMemoryQuizRepository::seeded()),
        Arc::new(InMemoryAttemptRepository::default()),
    );
    let creator = CreatorHandle("rookie.rae".to_string());
    let quiz_id = QuizId(ONBOARDING_QUIZ.to_string());

    // One attempt that skips a question, then one with two wrong answers.
    let quiz = onboarding_quiz();
    let questions = quiz.ordered_questions();
    let mut answers = SubmittedAnswers::default();
    for question in questions.iter().take(questions.len().saturating_sub(1)) {
        answers.select(question.id.clone(), AnswerId(format!("{}-0", question.id.0)));
    }
    for submitted in [answers.clone(), with_wrong_answers(answers, &questions)] {
        match quizzes.submit(&creator, &quiz_id, submitted) {
            Ok(submission) => println!("- {}", submission.result.summary()),
            Err(err) => println!("- submission failed: {}", err),
        }
    }
    if let Ok(history) = quizzes.history(&creator, &quiz_id) {
        println!(
            "- {} attempt(s) recorded | passed: {}",
            history.attempts.len(),
            history.ever_passed
        );
    }

    println!("\n{}-day challenge", CHALLENGE_LENGTH_DAYS);
    let days: Vec<ChallengeDayRecord> = (1..=8)
        .map(|day_number| ChallengeDayRecord {
            day_number,
            is_completed: day_number != 4,
            completed_at: None,
        })
        .collect();
    let progress = ChallengeProgress::from_days(&days);
    println!(
        "- {}/{} days complete ({}%) | next day {}",
        progress.completed(),
        progress.total_days,
        progress.percent(),
        progress
            .next_day()
            .map(|day| day.to_string())
            .unwrap_or_else(|| "none".to_string())
    );

    Ok(())
}

fn with_wrong_answers(mut answers: SubmittedAnswers, questions: &[&QuizQuestion]) -> SubmittedAnswers {
    for (position, question) in questions.iter().enumerate() {
        let choice = if position < 2 { 1 } else { 0 };
        answers.select(
            question.id.clone(),
            AnswerId(format!("{}-{choice}", question.id.0)),
        );
    }
    answers
}

fn render_stats(stats: &CreatorStats) {
    println!(
        "- {} total diamonds | {} this month | {} in the last 30 days",
        stats.total_diamonds, stats.monthly_diamonds, stats.diamonds_30d
    );
    println!(
        "- {} live days | {} live hours | status {}",
        stats.live_days, stats.live_hours, stats.current_status
    );
    println!(
        "- {:.1}% toward {} ({} target, {} remaining)",
        stats.current_progress_percent, stats.next_target, stats.target_amount, stats.remaining
    );
}

fn render_tier(result: &TierResult) {
    println!("Tier: {}", result.summary());
    println!(
        "  activity gate: {} | diamond gate: {}",
        gate_label(result.activity_gate_met),
        gate_label(result.diamond_gate_met)
    );
}

fn gate_label(met: bool) -> &'static str {
    if met {
        "met"
    } else {
        "not met"
    }
}
