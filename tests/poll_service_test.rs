use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use poll_service::models::actor_models::Actor;
use poll_service::models::poll_models::Poll;
use poll_service::services::commands::{
    AddOptionCommand, CreatePollCommand, RemoveOptionCommand, VoteCommand,
};
use poll_service::services::poll_service::PollService;
use poll_service::store::memory::MemoryPollStore;
use poll_service::store::PollStore;
use poll_service::utils::error::AppError;

fn setup() -> (PollService, Arc<MemoryPollStore>) {
    let store = Arc::new(MemoryPollStore::new());
    (PollService::new(store.clone()), store)
}

async fn new_poll(service: &PollService, creator: &Actor, options: &[&str], multi: bool) -> Poll {
    let cmd = CreatePollCommand::new(
        options.iter().map(|text| text.to_string()).collect(),
        multi,
    )
    .unwrap();
    service.create_poll(cmd, creator).await.unwrap()
}

fn vote(poll: &Poll, index: usize) -> VoteCommand {
    VoteCommand::new(&poll.id.to_hex(), &poll.choices[index].id).unwrap()
}

#[tokio::test]
async fn single_select_vote_switches_choices() {
    let (service, _) = setup();
    let creator = Actor::new(ObjectId::new());
    let voter = Actor::new(ObjectId::new());
    let poll = new_poll(&service, &creator, &["red", "blue"], false).await;

    let after_red = service.place_vote(vote(&poll, 0), &voter).await.unwrap();
    assert_eq!(after_red.choices[0].votes, vec![voter.id]);
    assert!(after_red.choices[1].votes.is_empty());

    let after_blue = service.place_vote(vote(&poll, 1), &voter).await.unwrap();
    assert!(after_blue.choices[0].votes.is_empty());
    assert_eq!(after_blue.choices[1].votes, vec![voter.id]);

    let after_retract = service.retract_vote(vote(&poll, 1), &voter).await.unwrap();
    assert!(after_retract.choices[0].votes.is_empty());
    assert!(after_retract.choices[1].votes.is_empty());
}

#[tokio::test]
async fn multi_select_votes_accumulate_across_choices() {
    let (service, _) = setup();
    let creator = Actor::new(ObjectId::new());
    let voter = Actor::new(ObjectId::new());
    let poll = new_poll(&service, &creator, &["x", "y"], true).await;

    service.place_vote(vote(&poll, 0), &voter).await.unwrap();
    let after_both = service.place_vote(vote(&poll, 1), &voter).await.unwrap();

    assert_eq!(after_both.choices[0].votes, vec![voter.id]);
    assert_eq!(after_both.choices[1].votes, vec![voter.id]);
}

#[tokio::test]
async fn repeated_place_and_retract_are_idempotent() {
    let (service, store) = setup();
    let creator = Actor::new(ObjectId::new());
    let voter = Actor::new(ObjectId::new());
    let poll = new_poll(&service, &creator, &["a", "b"], false).await;

    let first = service.place_vote(vote(&poll, 0), &voter).await.unwrap();
    let second = service.place_vote(vote(&poll, 0), &voter).await.unwrap();
    assert_eq!(first, second);
    // The repeat produced no write at all.
    assert_eq!(store.find(poll.id).await.unwrap().unwrap().version, first.version);

    let retracted = service.retract_vote(vote(&poll, 0), &voter).await.unwrap();
    let retracted_again = service.retract_vote(vote(&poll, 0), &voter).await.unwrap();
    assert_eq!(retracted, retracted_again);
}

#[tokio::test]
async fn retracting_a_vote_never_placed_is_not_an_error() {
    let (service, _) = setup();
    let creator = Actor::new(ObjectId::new());
    let poll = new_poll(&service, &creator, &["a", "b"], false).await;

    let result = service
        .retract_vote(vote(&poll, 0), &Actor::new(ObjectId::new()))
        .await
        .unwrap();
    assert_eq!(result.total_votes(), 0);
}

#[tokio::test]
async fn voting_on_unknown_poll_or_option_is_not_found() {
    let (service, _) = setup();
    let creator = Actor::new(ObjectId::new());
    let voter = Actor::new(ObjectId::new());
    let poll = new_poll(&service, &creator, &["a", "b"], false).await;

    let missing_poll = VoteCommand::new(&ObjectId::new().to_hex(), &poll.choices[0].id).unwrap();
    assert!(matches!(
        service.place_vote(missing_poll, &voter).await,
        Err(AppError::NotFound(_))
    ));

    let missing_option = VoteCommand::new(&poll.id.to_hex(), &ObjectId::new().to_hex()).unwrap();
    assert!(matches!(
        service.place_vote(missing_option, &voter).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service
            .retract_vote(VoteCommand::new(&poll.id.to_hex(), "missing").unwrap(), &voter)
            .await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn closed_polls_still_accept_votes() {
    let (service, _) = setup();
    let creator = Actor::new(ObjectId::new());
    let voter = Actor::new(ObjectId::new());
    let poll = new_poll(&service, &creator, &["a", "b"], false).await;

    service.close_poll(poll.id, &creator).await.unwrap();
    let after_vote = service.place_vote(vote(&poll, 0), &voter).await.unwrap();
    assert_eq!(after_vote.choices[0].votes, vec![voter.id]);
}

#[tokio::test]
async fn anyone_may_add_options_while_the_poll_is_open() {
    let (service, _) = setup();
    let creator = Actor::new(ObjectId::new());
    let stranger = Actor::new(ObjectId::new());
    let poll = new_poll(&service, &creator, &["a", "b"], false).await;

    let cmd = AddOptionCommand::new(&poll.id.to_hex(), "c").unwrap();
    let updated = service.add_option(cmd, &stranger).await.unwrap();

    assert_eq!(updated.choices.len(), 3);
    let added = updated.choices.last().unwrap();
    assert_eq!(added.text, "c");
    assert!(added.votes.is_empty());
    assert_eq!(added.submitted_by, stranger.id);
}

#[tokio::test]
async fn closed_polls_accept_options_from_the_creator_only() {
    let (service, store) = setup();
    let creator = Actor::new(ObjectId::new());
    let stranger = Actor::new(ObjectId::new());
    let poll = new_poll(&service, &creator, &["a", "b"], false).await;
    service.close_poll(poll.id, &creator).await.unwrap();

    let denied = service
        .add_option(AddOptionCommand::new(&poll.id.to_hex(), "c").unwrap(), &stranger)
        .await;
    assert!(matches!(denied, Err(AppError::Forbidden(_))));
    assert_eq!(store.find(poll.id).await.unwrap().unwrap().choices.len(), 2);

    let allowed = service
        .add_option(AddOptionCommand::new(&poll.id.to_hex(), "c").unwrap(), &creator)
        .await
        .unwrap();
    assert_eq!(allowed.choices.len(), 3);
    assert!(allowed.choices.last().unwrap().votes.is_empty());
}

#[tokio::test]
async fn duplicate_option_text_is_rejected() {
    let (service, _) = setup();
    let creator = Actor::new(ObjectId::new());
    let poll = new_poll(&service, &creator, &["a", "b"], false).await;

    let result = service
        .add_option(AddOptionCommand::new(&poll.id.to_hex(), " a ").unwrap(), &creator)
        .await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn option_removal_is_gated_and_leaves_other_votes_alone() {
    let (service, store) = setup();
    let creator = Actor::new(ObjectId::new());
    let submitter = Actor::new(ObjectId::new());
    let voter = Actor::new(ObjectId::new());
    let poll = new_poll(&service, &creator, &["a", "b"], true).await;

    let poll = service
        .add_option(AddOptionCommand::new(&poll.id.to_hex(), "c").unwrap(), &submitter)
        .await
        .unwrap();
    let submitted_id = poll.choices[2].id.clone();

    service.place_vote(vote(&poll, 1), &voter).await.unwrap();
    service.place_vote(vote(&poll, 2), &voter).await.unwrap();

    let stranger = Actor::new(ObjectId::new());
    let denied = service
        .remove_option(
            RemoveOptionCommand::new(&poll.id.to_hex(), &submitted_id).unwrap(),
            &stranger,
        )
        .await;
    assert!(matches!(denied, Err(AppError::Forbidden(_))));
    assert_eq!(store.find(poll.id).await.unwrap().unwrap().choices.len(), 3);

    // The submitter of the option may remove it; the vote on "b" survives.
    let updated = service
        .remove_option(
            RemoveOptionCommand::new(&poll.id.to_hex(), &submitted_id).unwrap(),
            &submitter,
        )
        .await
        .unwrap();
    assert_eq!(updated.choices.len(), 2);
    assert!(updated.choice(&submitted_id).is_none());
    assert_eq!(updated.choices[1].votes, vec![voter.id]);

    // An admin may remove anything.
    let admin = Actor::admin(ObjectId::new());
    let b_id = updated.choices[1].id.clone();
    let after_admin = service
        .remove_option(RemoveOptionCommand::new(&poll.id.to_hex(), &b_id).unwrap(), &admin)
        .await
        .unwrap();
    assert_eq!(after_admin.choices.len(), 1);
}

#[tokio::test]
async fn the_last_option_cannot_be_removed() {
    let (service, _) = setup();
    let creator = Actor::new(ObjectId::new());
    let poll = new_poll(&service, &creator, &["a", "b"], false).await;

    let b_id = poll.choices[1].id.clone();
    service
        .remove_option(RemoveOptionCommand::new(&poll.id.to_hex(), &b_id).unwrap(), &creator)
        .await
        .unwrap();

    let a_id = poll.choices[0].id.clone();
    let result = service
        .remove_option(RemoveOptionCommand::new(&poll.id.to_hex(), &a_id).unwrap(), &creator)
        .await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn removing_an_unknown_option_is_not_found() {
    let (service, _) = setup();
    let creator = Actor::new(ObjectId::new());
    let poll = new_poll(&service, &creator, &["a", "b"], false).await;

    let result = service
        .remove_option(
            RemoveOptionCommand::new(&poll.id.to_hex(), "missing").unwrap(),
            &creator,
        )
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn a_write_conflict_is_retried_and_commits() {
    let (service, store) = setup();
    let creator = Actor::new(ObjectId::new());
    let voter = Actor::new(ObjectId::new());
    let poll = new_poll(&service, &creator, &["a", "b"], false).await;

    store.inject_conflicts(1);
    let updated = service.place_vote(vote(&poll, 0), &voter).await.unwrap();
    assert_eq!(updated.choices[0].votes, vec![voter.id]);
}

#[tokio::test]
async fn persistent_conflicts_surface_after_retries_are_exhausted() {
    let (service, store) = setup();
    let creator = Actor::new(ObjectId::new());
    let voter = Actor::new(ObjectId::new());
    let poll = new_poll(&service, &creator, &["a", "b"], false).await;

    store.inject_conflicts(10);
    let result = service.place_vote(vote(&poll, 0), &voter).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    store.inject_conflicts(0);
    assert_eq!(store.find(poll.id).await.unwrap().unwrap().total_votes(), 0);
}

#[tokio::test]
async fn closing_is_creator_only_and_idempotent() {
    let (service, _) = setup();
    let creator = Actor::new(ObjectId::new());
    let stranger = Actor::new(ObjectId::new());
    let poll = new_poll(&service, &creator, &["a", "b"], false).await;

    assert!(matches!(
        service.close_poll(poll.id, &stranger).await,
        Err(AppError::Forbidden(_))
    ));

    let closed = service.close_poll(poll.id, &creator).await.unwrap();
    assert!(!closed.is_open);
    let closed_again = service.close_poll(poll.id, &creator).await.unwrap();
    assert_eq!(closed, closed_again);
}

#[tokio::test]
async fn deletion_is_creator_or_admin() {
    let (service, _) = setup();
    let creator = Actor::new(ObjectId::new());
    let stranger = Actor::new(ObjectId::new());
    let poll = new_poll(&service, &creator, &["a", "b"], false).await;

    assert!(matches!(
        service.delete_poll(poll.id, &stranger).await,
        Err(AppError::Forbidden(_))
    ));

    service.delete_poll(poll.id, &creator).await.unwrap();
    assert!(matches!(service.get_poll(poll.id).await, Err(AppError::NotFound(_))));

    let other = new_poll(&service, &creator, &["a", "b"], false).await;
    service.delete_poll(other.id, &Actor::admin(ObjectId::new())).await.unwrap();
    assert!(matches!(service.get_poll(other.id).await, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn single_select_invariant_holds_across_vote_sequences() {
    let (service, _) = setup();
    let creator = Actor::new(ObjectId::new());
    let voter = Actor::new(ObjectId::new());
    let poll = new_poll(&service, &creator, &["a", "b", "c"], false).await;

    for index in [0, 1, 2, 1, 0, 0] {
        let updated = service.place_vote(vote(&poll, index), &voter).await.unwrap();
        assert_eq!(updated.votes_by(&voter.id), 1);
    }
}
