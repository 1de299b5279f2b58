// RUST_TEST_THREADS=1 cargo test --test service -- --nocapture

use anyhow::Result;
use entity::{donation, reaction, report, request, Subject};
use givehub::{
    service::{NewDonation, NewMessage, NewUser, UserPatch},
    AppState, Error, Service,
};

mod util;
use util::create_test_state;

async fn create_user(service: &Service, email: &str) -> Result<entity::user::Model> {
    Ok(service
        .create_user(
            NewUser {
                name: "Test".to_owned(),
                last_name: "User".to_owned(),
                email: email.to_owned(),
                phone: email.to_owned(),
                password: "hash".to_owned(),
                role: None,
                profile_photo: None,
            },
            "https://media.test/avatar.webp",
        )
        .await?)
}

async fn create_donation(
    service: &Service,
    donor_id: i32,
    category: donation::Category,
) -> Result<donation::Model> {
    Ok(service
        .create_donation(NewDonation {
            donor_id,
            item: "winter coat".to_owned(),
            description: "barely used".to_owned(),
            category,
            media: vec![],
        })
        .await?)
}

async fn setup() -> Result<(AppState, entity::user::Model, donation::Model)> {
    let state = create_test_state().await?;
    let donor = create_user(&state.service, "donor@test.local").await?;
    let donation =
        create_donation(&state.service, donor.id, donation::Category::Clothing).await?;
    Ok((state, donor, donation))
}

#[tokio::test]
async fn toggle_like_idempotent_pair() -> Result<()> {
    let (state, _donor, donation) = setup().await?;
    let service = &state.service;
    let user = create_user(service, "liker@test.local").await?;

    let likes = service
        .toggle_reaction(reaction::Kind::Like, Subject::Donation, donation.id, user.id)
        .await?;
    assert_eq!(likes.len(), 1);
    assert_eq!(likes[0].user_id, user.id);

    // second toggle restores the original like set
    let likes = service
        .toggle_reaction(reaction::Kind::Like, Subject::Donation, donation.id, user.id)
        .await?;
    assert!(likes.is_empty());

    // saves are independent of likes
    let saves = service
        .toggle_reaction(reaction::Kind::Save, Subject::Donation, donation.id, user.id)
        .await?;
    assert_eq!(saves.len(), 1);
    let likes = service
        .reactions_for(reaction::Kind::Like, Subject::Donation, donation.id)
        .await?;
    assert!(likes.is_empty());

    // unknown donation
    let res = service
        .toggle_reaction(reaction::Kind::Like, Subject::Donation, donation.id + 99, user.id)
        .await;
    assert!(matches!(res, Err(Error::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn duplicate_request_conflict() -> Result<()> {
    let (state, _donor, donation) = setup().await?;
    let service = &state.service;
    let requester = create_user(service, "requester@test.local").await?;

    let first = service.submit_request(donation.id, requester.id).await?;
    assert_eq!(first.status, request::Status::Pending);

    let res = service.submit_request(donation.id, requester.id).await;
    assert!(matches!(res, Err(Error::Conflict(_))));

    // a rejected request no longer blocks a new one
    service
        .decide_request(donation.id, first.id, request::Status::Rejected)
        .await?;
    let again = service.submit_request(donation.id, requester.id).await?;
    assert_eq!(again.status, request::Status::Pending);

    let res = service.submit_request(donation.id + 99, requester.id).await;
    assert!(matches!(res, Err(Error::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn accept_cascade() -> Result<()> {
    let (state, _donor, donation) = setup().await?;
    let service = &state.service;
    let alice = create_user(service, "alice@test.local").await?;
    let bob = create_user(service, "bob@test.local").await?;

    let ra = service.submit_request(donation.id, alice.id).await?;
    let rb = service.submit_request(donation.id, bob.id).await?;

    let updated = service
        .decide_request(donation.id, ra.id, request::Status::Accepted)
        .await?;
    assert_eq!(updated.status, donation::Status::Completed);

    let requests = service.requests_for_donation(donation.id).await?;
    let ra = requests.iter().find(|r| r.id == ra.id).unwrap();
    let rb = requests.iter().find(|r| r.id == rb.id).unwrap();
    assert_eq!(ra.status, request::Status::Accepted);
    assert_eq!(rb.status, request::Status::Rejected);

    // the donation is complete, a second accept must lose
    let res = service
        .decide_request(donation.id, rb.id, request::Status::Accepted)
        .await;
    assert!(matches!(res, Err(Error::Conflict(_))));
    Ok(())
}

#[tokio::test]
async fn concurrent_accept_first_writer_wins() -> Result<()> {
    let (state, _donor, donation) = setup().await?;
    let service = &state.service;
    let alice = create_user(service, "alice@test.local").await?;
    let bob = create_user(service, "bob@test.local").await?;

    let ra = service.submit_request(donation.id, alice.id).await?;
    let rb = service.submit_request(donation.id, bob.id).await?;

    let res = tokio::join!(
        service.decide_request(donation.id, ra.id, request::Status::Accepted),
        service.decide_request(donation.id, rb.id, request::Status::Accepted)
    );
    match res {
        (Ok(_), Err(_)) | (Err(_), Ok(_)) => {}
        _ => panic!("exactly one accept may win"),
    }

    let updated = service.get_donation(donation.id).await?;
    assert_eq!(updated.status, donation::Status::Completed);

    let requests = service.requests_for_donation(donation.id).await?;
    let non_rejected: Vec<_> = requests
        .iter()
        .filter(|r| r.status != request::Status::Rejected)
        .collect();
    assert_eq!(non_rejected.len(), 1);
    assert_eq!(non_rejected[0].status, request::Status::Accepted);
    Ok(())
}

#[tokio::test]
async fn delete_report_leaves_siblings() -> Result<()> {
    let (state, _donor, donation) = setup().await?;
    let service = &state.service;
    let reporter = create_user(service, "reporter@test.local").await?;

    let first = service
        .create_report(Subject::Donation, donation.id, reporter.id, "spam".to_owned())
        .await?;
    let second = service
        .create_report(Subject::Donation, donation.id, reporter.id, "scam".to_owned())
        .await?;

    service
        .delete_report(Subject::Donation, donation.id, first.id)
        .await?;

    let reports = service.reports_for(Subject::Donation, donation.id).await?;
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].id, second.id);
    assert_eq!(reports[0].reason, "scam");

    let res = service
        .delete_report(Subject::Donation, donation.id, first.id)
        .await;
    assert!(matches!(res, Err(Error::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn report_status_transitions() -> Result<()> {
    let (state, _donor, donation) = setup().await?;
    let service = &state.service;
    let reporter = create_user(service, "reporter@test.local").await?;

    let report = service
        .create_report(Subject::Donation, donation.id, reporter.id, "spam".to_owned())
        .await?;
    assert_eq!(report.status, report::Status::Pending);

    let reviewed = service
        .set_report_status(
            Subject::Donation,
            donation.id,
            report.id,
            report::Status::Reviewed,
        )
        .await?;
    assert_eq!(reviewed.status, report::Status::Reviewed);

    let resolved = service
        .set_report_status(
            Subject::Donation,
            donation.id,
            report.id,
            report::Status::Resolved,
        )
        .await?;
    assert_eq!(resolved.status, report::Status::Resolved);

    let res = service
        .set_report_status(
            Subject::Donation,
            donation.id,
            report.id + 99,
            report::Status::Reviewed,
        )
        .await;
    assert!(matches!(res, Err(Error::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn pending_reports_feed() -> Result<()> {
    let (state, donor, donation) = setup().await?;
    let service = &state.service;
    let reporter = create_user(service, "reporter@test.local").await?;

    let report = service
        .create_report(Subject::Donation, donation.id, reporter.id, "spam".to_owned())
        .await?;

    let feed = service.donations_with_pending_reports().await?;
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].donation.id, donation.id);
    assert_eq!(feed[0].donor_email.as_deref(), Some(donor.email.as_str()));
    assert_eq!(feed[0].reports.len(), 1);
    assert_eq!(
        feed[0].reports[0].reporter_email.as_deref(),
        Some(reporter.email.as_str())
    );

    // reviewed reports drop out of the feed
    service
        .set_report_status(
            Subject::Donation,
            donation.id,
            report.id,
            report::Status::Reviewed,
        )
        .await?;
    let feed = service.donations_with_pending_reports().await?;
    assert!(feed.is_empty());
    Ok(())
}

#[tokio::test]
async fn media_bookkeeping() -> Result<()> {
    let (state, _donor, donation) = setup().await?;
    let service = &state.service;

    let media = service
        .attach_donation_media(
            donation.id,
            vec!["https://m.test/a.jpg".to_owned(), "https://m.test/b.jpg".to_owned()],
        )
        .await?;
    assert_eq!(media, vec!["https://m.test/a.jpg", "https://m.test/b.jpg"]);
    assert_eq!(service.donation_media(donation.id).await?, media);

    let media = service.remove_donation_media(donation.id, 0).await?;
    assert_eq!(media, vec!["https://m.test/b.jpg"]);
    assert_eq!(service.donation_media(donation.id).await?, media);

    let res = service.remove_donation_media(donation.id, 5).await;
    assert!(matches!(res, Err(Error::Validation(_))));
    Ok(())
}

#[tokio::test]
async fn comments() -> Result<()> {
    let (state, _donor, donation) = setup().await?;
    let service = &state.service;
    let author = create_user(service, "author@test.local").await?;

    let res = service
        .add_comment(Subject::Donation, donation.id, author.id, "  ".to_owned())
        .await;
    assert!(matches!(res, Err(Error::Validation(_))));

    let comment = service
        .add_comment(Subject::Donation, donation.id, author.id, "nice coat".to_owned())
        .await?;
    let updated = service
        .update_comment(
            Subject::Donation,
            donation.id,
            comment.id,
            "very nice coat".to_owned(),
        )
        .await?;
    assert_eq!(updated.content, "very nice coat");

    service
        .delete_comment(Subject::Donation, donation.id, comment.id)
        .await?;
    let res = service
        .delete_comment(Subject::Donation, donation.id, comment.id)
        .await;
    assert!(matches!(res, Err(Error::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn clothing_scenario() -> Result<()> {
    // create donation -> two requests -> accept one -> completed, loser rejected
    let state = create_test_state().await?;
    let service = &state.service;
    let donor = create_user(service, "donor@test.local").await?;
    let alice = create_user(service, "alice@test.local").await?;
    let bob = create_user(service, "bob@test.local").await?;

    let donation = create_donation(service, donor.id, donation::Category::Clothing).await?;
    assert_eq!(donation.status, donation::Status::Pending);
    assert_eq!(donation.category, donation::Category::Clothing);

    let ra = service.submit_request(donation.id, alice.id).await?;
    service.submit_request(donation.id, bob.id).await?;

    service
        .decide_request(donation.id, ra.id, request::Status::Accepted)
        .await?;

    let donation = service.get_donation(donation.id).await?;
    assert_eq!(donation.status, donation::Status::Completed);
    let requests = service.requests_for_donation(donation.id).await?;
    assert_eq!(requests.len(), 2);
    for r in requests {
        if r.requester_id == alice.id {
            assert_eq!(r.status, request::Status::Accepted);
        } else {
            assert_eq!(r.status, request::Status::Rejected);
        }
    }
    Ok(())
}

#[tokio::test]
async fn select_recipient_unconditional() -> Result<()> {
    let (state, _donor, donation) = setup().await?;
    let service = &state.service;
    let user = create_user(service, "recipient@test.local").await?;

    let updated = service.select_recipient(donation.id, user.id).await?;
    assert_eq!(updated.selected_recipient, Some(user.id));

    let res = service.select_recipient(donation.id + 99, user.id).await;
    assert!(matches!(res, Err(Error::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn profile_patch_and_filters() -> Result<()> {
    let state = create_test_state().await?;
    let service = &state.service;
    let user = create_user(service, "patch@test.local").await?;

    let patched = service
        .patch_user(
            user.id,
            UserPatch {
                bio: Some("volunteer".to_owned()),
                country: Some("PT".to_owned()),
                interests: Some(vec!["books".to_owned()]),
                role: Some(entity::user::Role::Donor),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(patched.bio.as_deref(), Some("volunteer"));
    assert_eq!(patched.country.as_deref(), Some("PT"));
    assert_eq!(patched.role, entity::user::Role::Donor);
    // untouched fields keep their values
    assert_eq!(patched.name, user.name);
    assert_eq!(patched.email, user.email);

    let other = create_user(service, "other@test.local").await?;

    let donors = service
        .list_users(givehub::service::UserFilter {
            role: Some(entity::user::Role::Donor),
            ..Default::default()
        })
        .await?;
    assert_eq!(donors.len(), 1);
    assert_eq!(donors[0].id, user.id);

    let readers = service
        .list_users(givehub::service::UserFilter {
            interest: Some("books".to_owned()),
            ..Default::default()
        })
        .await?;
    assert_eq!(readers.len(), 1);
    assert_eq!(readers[0].id, user.id);

    let all = service.list_users(Default::default()).await?;
    assert_eq!(all.len(), 2);
    assert!(all.iter().any(|u| u.id == other.id));
    Ok(())
}

#[tokio::test]
async fn dashboard_stats() -> Result<()> {
    let state = create_test_state().await?;
    let service = &state.service;
    let donor = create_user(service, "donor@test.local").await?;
    service
        .patch_user(
            donor.id,
            UserPatch {
                role: Some(entity::user::Role::Donor),
                ..Default::default()
            },
        )
        .await?;
    create_user(service, "user@test.local").await?;
    create_donation(service, donor.id, donation::Category::Books).await?;

    let [users, donations, posts, donors] = service.dashboard_stats().await?;
    assert_eq!(users, 2);
    assert_eq!(donations, 1);
    assert_eq!(posts, 0);
    assert_eq!(donors, 1);
    Ok(())
}

#[tokio::test]
async fn messages_and_chats() -> Result<()> {
    let state = create_test_state().await?;
    let service = &state.service;
    let alice = create_user(service, "alice@test.local").await?;
    let bob = create_user(service, "bob@test.local").await?;
    let carol = create_user(service, "carol@test.local").await?;

    let chat = service.create_chat(vec![alice.id, bob.id]).await?;
    let message = service
        .create_message(NewMessage {
            sender_id: alice.id,
            recipient_id: bob.id,
            content: "is the coat still available?".to_owned(),
            media: vec![],
            chat_id: Some(chat.id),
        })
        .await?;

    let inbox = service.messages_for_user(bob.id).await?;
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].id, message.id);
    assert!(service.messages_for_user(carol.id).await?.is_empty());

    let chats = service.chats_for_user(alice.id).await?;
    assert_eq!(chats.len(), 1);
    assert!(service.chats_for_user(carol.id).await?.is_empty());

    service.delete_message(message.id).await?;
    assert!(matches!(
        service.get_message(message.id).await,
        Err(Error::NotFound(_))
    ));
    Ok(())
}
