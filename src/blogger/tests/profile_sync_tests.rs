//! Autosave integration between the profile editor and the repository.

use super::fashion_blogger;
use crate::blogger::adapters::{InMemoryBloggerRepository, ProfileSaver};
use crate::blogger::domain::ProfileDraft;
use crate::blogger::ports::BloggerRepository;
use crate::sync::{DebouncedSynchronizer, SaveStatus, SyncPolicy};
use eyre::{OptionExt, Result, ensure};
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;

fn draft(name: &str, tone: &str) -> ProfileDraft {
    ProfileDraft {
        name: name.to_owned(),
        tone_of_voice: Some(tone.to_owned()),
        theme: None,
        voice_id: None,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn profile_edits_reach_the_repository_through_autosave() -> Result<()> {
    let repository = Arc::new(InMemoryBloggerRepository::new());
    let clock = Arc::new(DefaultClock);
    let blogger = fashion_blogger();
    repository.store(&blogger).await?;

    let saver = Arc::new(ProfileSaver::new(
        Arc::clone(&repository),
        Arc::clone(&clock),
        blogger.id(),
    ));
    let mut sync = DebouncedSynchronizer::new(saver, clock, SyncPolicy::immediate());

    sync.trigger(draft("Mia", "pl"));
    sync.trigger(draft("Mia Laurent", "playful"));
    let writes = sync.flush_due().await;
    ensure!(writes == 1, "edits were not coalesced into one write");
    ensure!(sync.status() == SaveStatus::Saved, "save did not complete");

    let stored = repository
        .find_by_id(blogger.id())
        .await?
        .ok_or_eyre("blogger missing after autosave")?;
    ensure!(stored.name() == "Mia Laurent", "latest name not persisted");
    ensure!(
        stored.tone_of_voice() == Some("playful"),
        "latest tone not persisted"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn autosave_for_an_unknown_blogger_surfaces_an_error_status() -> Result<()> {
    let repository = Arc::new(InMemoryBloggerRepository::new());
    let clock = Arc::new(DefaultClock);
    let orphan = fashion_blogger();

    let saver = Arc::new(ProfileSaver::new(
        Arc::clone(&repository),
        Arc::clone(&clock),
        orphan.id(),
    ));
    let mut sync = DebouncedSynchronizer::new(saver, clock, SyncPolicy::immediate());

    sync.trigger(draft("Mia", "playful"));
    sync.flush_due().await;
    ensure!(
        sync.status() == SaveStatus::Error,
        "missing blogger should surface as a save error"
    );
    ensure!(
        repository.list().await?.is_empty(),
        "nothing should have been written"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_name_drafts_fail_without_touching_the_profile() -> Result<()> {
    let repository = Arc::new(InMemoryBloggerRepository::new());
    let clock = Arc::new(DefaultClock);
    let blogger = fashion_blogger();
    repository.store(&blogger).await?;

    let saver = Arc::new(ProfileSaver::new(
        Arc::clone(&repository),
        Arc::clone(&clock),
        blogger.id(),
    ));
    let mut sync = DebouncedSynchronizer::new(saver, clock, SyncPolicy::immediate());

    sync.trigger(draft("  ", "playful"));
    sync.flush_due().await;
    ensure!(
        sync.status() == SaveStatus::Error,
        "invalid draft should surface as a save error"
    );

    let stored = repository
        .find_by_id(blogger.id())
        .await?
        .ok_or_eyre("blogger missing")?;
    ensure!(stored.name() == "Mia", "profile must be unchanged");
    Ok(())
}
