use crate::{media::MediaHost, now, Error, Result};
use entity::{chat, comment, donation, message, post, reaction, report, request, user, Subject};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbConn, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// seconds per year, used by the age-range filter
const YEAR_SECS: i64 = 31_557_600;

/// Donation platform service
pub struct Service {
    media: Box<dyn MediaHost + Sync + Send>,
    conn: DbConn,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// already hashed by the caller
    pub password: String,
    #[serde(default)]
    pub role: Option<user::Role>,
    #[serde(default)]
    pub profile_photo: Option<String>,
}

/// typed partial profile update; absent fields stay untouched
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub profile_photo: Option<String>,
    pub background_image: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub birthday: Option<i64>,
    pub availability: Option<bool>,
    pub gender: Option<user::Gender>,
    pub anonymity: Option<bool>,
    pub interests: Option<Vec<String>>,
    pub role: Option<user::Role>,
    pub xp_points: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserFilter {
    pub role: Option<user::Role>,
    pub gender: Option<user::Gender>,
    pub anonymity: Option<bool>,
    pub availability: Option<bool>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub interest: Option<String>,
    pub min_age: Option<i64>,
    pub max_age: Option<i64>,
    /// unix seconds
    pub joined_after: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewDonation {
    pub donor_id: i32,
    pub item: String,
    pub description: String,
    pub category: donation::Category,
    #[serde(default)]
    pub media: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DonationPatch {
    pub item: Option<String>,
    pub description: Option<String>,
    pub category: Option<donation::Category>,
    pub status: Option<donation::Status>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPost {
    pub author_id: i32,
    pub title: String,
    pub content: String,
    pub category: post::Category,
    #[serde(default)]
    pub status: Option<post::Status>,
    #[serde(default)]
    pub media: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<post::Category>,
    pub status: Option<post::Status>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMessage {
    pub sender_id: i32,
    pub recipient_id: i32,
    pub content: String,
    #[serde(default)]
    pub media: Vec<String>,
    #[serde(default)]
    pub chat_id: Option<i32>,
}

/// a pending report decorated with reporter display fields
#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    #[serde(flatten)]
    pub report: report::Model,
    pub reporter_name: Option<String>,
    pub reporter_email: Option<String>,
}

/// a donation in the moderation feed, decorated with donor display fields
#[derive(Debug, Clone, Serialize)]
pub struct ReportedDonation {
    #[serde(flatten)]
    pub donation: donation::Model,
    pub donor_name: Option<String>,
    pub donor_email: Option<String>,
    pub reports: Vec<ReportView>,
}

impl Service {
    pub fn new(media: Box<dyn MediaHost + Sync + Send>, conn: DbConn) -> Self {
        Self { media, conn }
    }

    pub fn db(&self) -> &DbConn {
        &self.conn
    }

    /// NotFound unless the owning document of a sub-collection row exists
    async fn assert_subject_exists(&self, subject: Subject, id: i32) -> Result<()> {
        let found = match subject {
            Subject::Donation => donation::Entity::find_by_id(id)
                .one(self.db())
                .await?
                .is_some(),
            Subject::Post => post::Entity::find_by_id(id).one(self.db()).await?.is_some(),
            Subject::User => user::Entity::find_by_id(id).one(self.db()).await?.is_some(),
        };
        if found {
            Ok(())
        } else {
            Err(Error::NotFound(subject_name(subject)))
        }
    }

    // ==================== users ====================

    pub async fn create_user(&self, data: NewUser, default_photo: &str) -> Result<user::Model> {
        let existing = user::Entity::find()
            .filter(user::Column::Email.eq(data.email.clone()))
            .one(self.db())
            .await?;
        if existing.is_some() {
            return Err(Error::Conflict("Email already in use.".to_owned()));
        }

        let time = now() as i64;
        Ok(user::ActiveModel {
            id: NotSet,
            name: Set(data.name),
            last_name: Set(data.last_name),
            email: Set(data.email),
            phone: Set(data.phone),
            password: Set(data.password),
            role: Set(data.role.unwrap_or(user::Role::User)),
            profile_photo: Set(Some(
                data.profile_photo.unwrap_or_else(|| default_photo.to_owned()),
            )),
            background_image: Set(None),
            bio: Set(None),
            country: Set(None),
            state: Set(None),
            address: Set(None),
            birthday: Set(None),
            availability: Set(true),
            gender: Set(None),
            anonymity: Set(false),
            interests: Set(json!([])),
            xp_points: Set(0),
            created_at: Set(time),
            updated_at: Set(time),
        }
        .insert(self.db())
        .await?)
    }

    pub async fn get_user(&self, id: i32) -> Result<user::Model> {
        user::Entity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or(Error::NotFound("User"))
    }

    pub async fn user_by_email(&self, email: &str) -> Result<Option<user::Model>> {
        Ok(user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db())
            .await?)
    }

    pub async fn list_users(&self, filter: UserFilter) -> Result<Vec<user::Model>> {
        let mut select = user::Entity::find();
        if let Some(role) = filter.role {
            select = select.filter(user::Column::Role.eq(role));
        }
        if let Some(gender) = filter.gender {
            select = select.filter(user::Column::Gender.eq(gender));
        }
        if let Some(anonymity) = filter.anonymity {
            select = select.filter(user::Column::Anonymity.eq(anonymity));
        }
        if let Some(availability) = filter.availability {
            select = select.filter(user::Column::Availability.eq(availability));
        }
        if let Some(country) = filter.country {
            select = select.filter(user::Column::Country.eq(country));
        }
        if let Some(state) = filter.state {
            select = select.filter(user::Column::State.eq(state));
        }
        if let Some(joined_after) = filter.joined_after {
            select = select.filter(user::Column::CreatedAt.gte(joined_after));
        }
        let time = now() as i64;
        if let Some(min_age) = filter.min_age {
            select = select.filter(user::Column::Birthday.lte(time - min_age * YEAR_SECS));
        }
        if let Some(max_age) = filter.max_age {
            select = select.filter(user::Column::Birthday.gte(time - max_age * YEAR_SECS));
        }
        let users = select.all(self.db()).await?;

        // interests live in a json array, filtered here rather than in sql
        // so the query stays portable across the three sqlx backends
        Ok(match filter.interest {
            Some(interest) => users
                .into_iter()
                .filter(|u| u.interests().iter().any(|i| i == &interest))
                .collect(),
            None => users,
        })
    }

    pub async fn patch_user(&self, id: i32, patch: UserPatch) -> Result<user::Model> {
        let current = self.get_user(id).await?;
        let mut active: user::ActiveModel = current.into();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(last_name) = patch.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(bio) = patch.bio {
            active.bio = Set(Some(bio));
        }
        if let Some(photo) = patch.profile_photo {
            active.profile_photo = Set(Some(photo));
        }
        if let Some(image) = patch.background_image {
            active.background_image = Set(Some(image));
        }
        if let Some(country) = patch.country {
            active.country = Set(Some(country));
        }
        if let Some(state) = patch.state {
            active.state = Set(Some(state));
        }
        if let Some(address) = patch.address {
            active.address = Set(Some(address));
        }
        if let Some(birthday) = patch.birthday {
            active.birthday = Set(Some(birthday));
        }
        if let Some(availability) = patch.availability {
            active.availability = Set(availability);
        }
        if let Some(gender) = patch.gender {
            active.gender = Set(Some(gender));
        }
        if let Some(anonymity) = patch.anonymity {
            active.anonymity = Set(anonymity);
        }
        if let Some(interests) = patch.interests {
            active.interests = Set(json!(interests));
        }
        if let Some(role) = patch.role {
            active.role = Set(role);
        }
        if let Some(xp) = patch.xp_points {
            active.xp_points = Set(xp);
        }
        active.updated_at = Set(now() as i64);
        Ok(active.update(self.db()).await?)
    }

    pub async fn delete_user(&self, id: i32) -> Result<()> {
        let res = user::Entity::delete_by_id(id).exec(self.db()).await?;
        if res.rows_affected != 1 {
            return Err(Error::NotFound("User"));
        }
        Ok(())
    }

    /// users carrying at least one report
    pub async fn reported_users(&self) -> Result<Vec<user::Model>> {
        let reports = report::Entity::find()
            .filter(report::Column::Subject.eq(Subject::User))
            .all(self.db())
            .await?;
        let mut ids: Vec<i32> = reports.iter().map(|r| r.subject_id).collect();
        ids.sort_unstable();
        ids.dedup();
        Ok(user::Entity::find()
            .filter(user::Column::Id.is_in(ids))
            .all(self.db())
            .await?)
    }

    pub async fn user_ranking(&self) -> Result<Vec<user::Model>> {
        Ok(user::Entity::find()
            .order_by_desc(user::Column::XpPoints)
            .all(self.db())
            .await?)
    }

    // ==================== donations ====================

    pub async fn create_donation(&self, data: NewDonation) -> Result<donation::Model> {
        self.get_user(data.donor_id).await?;
        let time = now() as i64;
        Ok(donation::ActiveModel {
            id: NotSet,
            donor_id: Set(data.donor_id),
            item: Set(data.item),
            description: Set(data.description),
            category: Set(data.category),
            status: Set(donation::Status::Pending),
            media: Set(json!(data.media)),
            selected_recipient: Set(None),
            created_at: Set(time),
            updated_at: Set(time),
        }
        .insert(self.db())
        .await?)
    }

    pub async fn get_donation(&self, id: i32) -> Result<donation::Model> {
        donation::Entity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or(Error::NotFound("Donation"))
    }

    pub async fn list_donations(&self) -> Result<Vec<donation::Model>> {
        Ok(donation::Entity::find().all(self.db()).await?)
    }

    pub async fn donations_by_status(
        &self,
        status: donation::Status,
    ) -> Result<Vec<donation::Model>> {
        Ok(donation::Entity::find()
            .filter(donation::Column::Status.eq(status))
            .all(self.db())
            .await?)
    }

    pub async fn donations_by_category(
        &self,
        category: donation::Category,
    ) -> Result<Vec<donation::Model>> {
        Ok(donation::Entity::find()
            .filter(donation::Column::Category.eq(category))
            .all(self.db())
            .await?)
    }

    pub async fn donations_by_donor(&self, donor_id: i32) -> Result<Vec<donation::Model>> {
        Ok(donation::Entity::find()
            .filter(donation::Column::DonorId.eq(donor_id))
            .all(self.db())
            .await?)
    }

    pub async fn update_donation(
        &self,
        id: i32,
        patch: DonationPatch,
    ) -> Result<donation::Model> {
        let current = self.get_donation(id).await?;
        let mut active: donation::ActiveModel = current.into();
        if let Some(item) = patch.item {
            active.item = Set(item);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        if let Some(category) = patch.category {
            active.category = Set(category);
        }
        if let Some(status) = patch.status {
            active.status = Set(status);
        }
        active.updated_at = Set(now() as i64);
        Ok(active.update(self.db()).await?)
    }

    /// hard delete; sub-collection rows go with the donation
    pub async fn delete_donation(&self, id: i32) -> Result<()> {
        let txn = self.conn.begin().await?;
        let res = donation::Entity::delete_by_id(id).exec(&txn).await?;
        if res.rows_affected != 1 {
            return Err(Error::NotFound("Donation"));
        }
        request::Entity::delete_many()
            .filter(request::Column::DonationId.eq(id))
            .exec(&txn)
            .await?;
        report::Entity::delete_many()
            .filter(report::Column::Subject.eq(Subject::Donation))
            .filter(report::Column::SubjectId.eq(id))
            .exec(&txn)
            .await?;
        comment::Entity::delete_many()
            .filter(comment::Column::Subject.eq(Subject::Donation))
            .filter(comment::Column::SubjectId.eq(id))
            .exec(&txn)
            .await?;
        reaction::Entity::delete_many()
            .filter(reaction::Column::Subject.eq(Subject::Donation))
            .filter(reaction::Column::SubjectId.eq(id))
            .exec(&txn)
            .await?;
        txn.commit().await?;
        Ok(())
    }

    /// unconditional set; the caller is not checked against accepted requesters
    pub async fn select_recipient(&self, id: i32, user_id: i32) -> Result<donation::Model> {
        let donation = self.get_donation(id).await?;
        let mut active: donation::ActiveModel = donation.into();
        active.selected_recipient = Set(Some(user_id));
        active.updated_at = Set(now() as i64);
        Ok(active.update(self.db()).await?)
    }

    // ==================== requests ====================

    pub async fn submit_request(
        &self,
        donation_id: i32,
        requester_id: i32,
    ) -> Result<request::Model> {
        self.get_donation(donation_id).await?;

        let existing = request::Entity::find()
            .filter(request::Column::DonationId.eq(donation_id))
            .filter(request::Column::RequesterId.eq(requester_id))
            .filter(request::Column::Status.ne(request::Status::Rejected))
            .one(self.db())
            .await?;
        if existing.is_some() {
            return Err(Error::Conflict(
                "You have already requested this donation".to_owned(),
            ));
        }

        Ok(request::ActiveModel {
            id: NotSet,
            donation_id: Set(donation_id),
            requester_id: Set(requester_id),
            status: Set(request::Status::Pending),
            created_at: Set(now() as i64),
        }
        .insert(self.db())
        .await?)
    }

    pub async fn requests_for_donation(&self, donation_id: i32) -> Result<Vec<request::Model>> {
        self.get_donation(donation_id).await?;
        Ok(request::Entity::find()
            .filter(request::Column::DonationId.eq(donation_id))
            .order_by_desc(request::Column::CreatedAt)
            .all(self.db())
            .await?)
    }

    /// Decide a pending request. Accepting cascades: the winning request is
    /// accepted, every sibling is rejected and the donation completes, all in
    /// one transaction. Each step is a conditional update; a second
    /// concurrent accept loses on `rows_affected` and surfaces as Conflict.
    pub async fn decide_request(
        &self,
        donation_id: i32,
        request_id: i32,
        decision: request::Status,
    ) -> Result<donation::Model> {
        let donation = self.get_donation(donation_id).await?;
        request::Entity::find_by_id(request_id)
            .filter(request::Column::DonationId.eq(donation_id))
            .one(self.db())
            .await?
            .ok_or(Error::NotFound("Request"))?;

        match decision {
            request::Status::Pending => Err(Error::Validation(
                "status must be accepted or rejected".to_owned(),
            )),
            request::Status::Rejected => {
                let res = request::Entity::update_many()
                    .set(request::ActiveModel {
                        status: Set(request::Status::Rejected),
                        ..Default::default()
                    })
                    .filter(request::Column::Id.eq(request_id))
                    .filter(request::Column::Status.eq(request::Status::Pending))
                    .exec(self.db())
                    .await?;
                if res.rows_affected != 1 {
                    return Err(Error::Conflict(
                        "The request has already been decided.".to_owned(),
                    ));
                }
                Ok(donation)
            }
            request::Status::Accepted => {
                let txn = self.conn.begin().await?;

                let res = request::Entity::update_many()
                    .set(request::ActiveModel {
                        status: Set(request::Status::Accepted),
                        ..Default::default()
                    })
                    .filter(request::Column::Id.eq(request_id))
                    .filter(request::Column::Status.eq(request::Status::Pending))
                    .exec(&txn)
                    .await?;
                if res.rows_affected != 1 {
                    return Err(Error::Conflict(
                        "The request has already been decided.".to_owned(),
                    ));
                }

                request::Entity::update_many()
                    .set(request::ActiveModel {
                        status: Set(request::Status::Rejected),
                        ..Default::default()
                    })
                    .filter(request::Column::DonationId.eq(donation_id))
                    .filter(request::Column::Id.ne(request_id))
                    .exec(&txn)
                    .await?;

                let res = donation::Entity::update_many()
                    .set(donation::ActiveModel {
                        status: Set(donation::Status::Completed),
                        updated_at: Set(now() as i64),
                        ..Default::default()
                    })
                    .filter(donation::Column::Id.eq(donation_id))
                    .filter(donation::Column::Status.is_in([
                        donation::Status::Pending,
                        donation::Status::Approved,
                    ]))
                    .exec(&txn)
                    .await?;
                if res.rows_affected != 1 {
                    return Err(Error::Conflict(
                        "The donation is already completed or shut down.".to_owned(),
                    ));
                }

                txn.commit().await?;
                self.get_donation(donation_id).await
            }
        }
    }

    // ==================== reports ====================

    pub async fn create_report(
        &self,
        subject: Subject,
        subject_id: i32,
        reporter_id: i32,
        reason: String,
    ) -> Result<report::Model> {
        self.assert_subject_exists(subject, subject_id).await?;
        Ok(report::ActiveModel {
            id: NotSet,
            subject: Set(subject),
            subject_id: Set(subject_id),
            reporter_id: Set(reporter_id),
            reason: Set(reason),
            status: Set(report::Status::Pending),
            created_at: Set(now() as i64),
        }
        .insert(self.db())
        .await?)
    }

    pub async fn delete_report(
        &self,
        subject: Subject,
        subject_id: i32,
        report_id: i32,
    ) -> Result<()> {
        self.assert_subject_exists(subject, subject_id).await?;
        let res = report::Entity::delete_many()
            .filter(report::Column::Id.eq(report_id))
            .filter(report::Column::Subject.eq(subject))
            .filter(report::Column::SubjectId.eq(subject_id))
            .exec(self.db())
            .await?;
        if res.rows_affected != 1 {
            return Err(Error::NotFound("Report"));
        }
        Ok(())
    }

    pub async fn set_report_status(
        &self,
        subject: Subject,
        subject_id: i32,
        report_id: i32,
        status: report::Status,
    ) -> Result<report::Model> {
        self.assert_subject_exists(subject, subject_id).await?;
        let res = report::Entity::update_many()
            .set(report::ActiveModel {
                status: Set(status),
                ..Default::default()
            })
            .filter(report::Column::Id.eq(report_id))
            .filter(report::Column::Subject.eq(subject))
            .filter(report::Column::SubjectId.eq(subject_id))
            .exec(self.db())
            .await?;
        if res.rows_affected != 1 {
            return Err(Error::NotFound("Report"));
        }
        report::Entity::find_by_id(report_id)
            .one(self.db())
            .await?
            .ok_or(Error::NotFound("Report"))
    }

    pub async fn reports_for(
        &self,
        subject: Subject,
        subject_id: i32,
    ) -> Result<Vec<report::Model>> {
        self.assert_subject_exists(subject, subject_id).await?;
        Ok(report::Entity::find()
            .filter(report::Column::Subject.eq(subject))
            .filter(report::Column::SubjectId.eq(subject_id))
            .order_by_desc(report::Column::CreatedAt)
            .all(self.db())
            .await?)
    }

    /// moderation feed: donations carrying at least one pending report,
    /// decorated with donor and reporter display fields
    pub async fn donations_with_pending_reports(&self) -> Result<Vec<ReportedDonation>> {
        let reports = report::Entity::find()
            .filter(report::Column::Subject.eq(Subject::Donation))
            .filter(report::Column::Status.eq(report::Status::Pending))
            .order_by_desc(report::Column::CreatedAt)
            .all(self.db())
            .await?;

        let mut donation_ids: Vec<i32> = reports.iter().map(|r| r.subject_id).collect();
        donation_ids.sort_unstable();
        donation_ids.dedup();
        let donations = donation::Entity::find()
            .filter(donation::Column::Id.is_in(donation_ids))
            .all(self.db())
            .await?;

        let mut user_ids: Vec<i32> = reports.iter().map(|r| r.reporter_id).collect();
        user_ids.extend(donations.iter().map(|d| d.donor_id));
        user_ids.sort_unstable();
        user_ids.dedup();
        let users = user::Entity::find()
            .filter(user::Column::Id.is_in(user_ids))
            .all(self.db())
            .await?;
        let display = |id: i32| -> (Option<String>, Option<String>) {
            users
                .iter()
                .find(|u| u.id == id)
                .map(|u| (Some(u.name.clone()), Some(u.email.clone())))
                .unwrap_or((None, None))
        };

        Ok(donations
            .into_iter()
            .map(|donation| {
                let (donor_name, donor_email) = display(donation.donor_id);
                let reports = reports
                    .iter()
                    .filter(|r| r.subject_id == donation.id)
                    .map(|r| {
                        let (reporter_name, reporter_email) = display(r.reporter_id);
                        ReportView {
                            report: r.clone(),
                            reporter_name,
                            reporter_email,
                        }
                    })
                    .collect();
                ReportedDonation {
                    donation,
                    donor_name,
                    donor_email,
                    reports,
                }
            })
            .collect())
    }

    pub async fn posts_with_pending_reports(&self) -> Result<Vec<post::Model>> {
        let reports = report::Entity::find()
            .filter(report::Column::Subject.eq(Subject::Post))
            .filter(report::Column::Status.eq(report::Status::Pending))
            .order_by_desc(report::Column::CreatedAt)
            .all(self.db())
            .await?;
        let mut ids: Vec<i32> = reports.iter().map(|r| r.subject_id).collect();
        ids.sort_unstable();
        ids.dedup();
        Ok(post::Entity::find()
            .filter(post::Column::Id.is_in(ids))
            .all(self.db())
            .await?)
    }

    // ==================== comments ====================

    pub async fn add_comment(
        &self,
        subject: Subject,
        subject_id: i32,
        author_id: i32,
        content: String,
    ) -> Result<comment::Model> {
        if content.trim().is_empty() {
            return Err(Error::Validation("Comment content is required".to_owned()));
        }
        self.assert_subject_exists(subject, subject_id).await?;
        let time = now() as i64;
        Ok(comment::ActiveModel {
            id: NotSet,
            subject: Set(subject),
            subject_id: Set(subject_id),
            author_id: Set(author_id),
            content: Set(content),
            created_at: Set(time),
            updated_at: Set(time),
        }
        .insert(self.db())
        .await?)
    }

    pub async fn update_comment(
        &self,
        subject: Subject,
        subject_id: i32,
        comment_id: i32,
        content: String,
    ) -> Result<comment::Model> {
        if content.trim().is_empty() {
            return Err(Error::Validation("Comment content is required".to_owned()));
        }
        self.assert_subject_exists(subject, subject_id).await?;
        let res = comment::Entity::update_many()
            .set(comment::ActiveModel {
                content: Set(content),
                updated_at: Set(now() as i64),
                ..Default::default()
            })
            .filter(comment::Column::Id.eq(comment_id))
            .filter(comment::Column::Subject.eq(subject))
            .filter(comment::Column::SubjectId.eq(subject_id))
            .exec(self.db())
            .await?;
        if res.rows_affected != 1 {
            return Err(Error::NotFound("Comment"));
        }
        comment::Entity::find_by_id(comment_id)
            .one(self.db())
            .await?
            .ok_or(Error::NotFound("Comment"))
    }

    pub async fn delete_comment(
        &self,
        subject: Subject,
        subject_id: i32,
        comment_id: i32,
    ) -> Result<()> {
        self.assert_subject_exists(subject, subject_id).await?;
        let res = comment::Entity::delete_many()
            .filter(comment::Column::Id.eq(comment_id))
            .filter(comment::Column::Subject.eq(subject))
            .filter(comment::Column::SubjectId.eq(subject_id))
            .exec(self.db())
            .await?;
        if res.rows_affected != 1 {
            return Err(Error::NotFound("Comment"));
        }
        Ok(())
    }

    pub async fn comments_for(
        &self,
        subject: Subject,
        subject_id: i32,
    ) -> Result<Vec<comment::Model>> {
        self.assert_subject_exists(subject, subject_id).await?;
        Ok(comment::Entity::find()
            .filter(comment::Column::Subject.eq(subject))
            .filter(comment::Column::SubjectId.eq(subject_id))
            .order_by_desc(comment::Column::CreatedAt)
            .all(self.db())
            .await?)
    }

    // ==================== likes / saves ====================

    /// remove the reaction if present, append it otherwise; returns the
    /// resulting reaction set
    pub async fn toggle_reaction(
        &self,
        kind: reaction::Kind,
        subject: Subject,
        subject_id: i32,
        user_id: i32,
    ) -> Result<Vec<reaction::Model>> {
        self.assert_subject_exists(subject, subject_id).await?;
        let removed = reaction::Entity::delete_many()
            .filter(reaction::Column::Kind.eq(kind))
            .filter(reaction::Column::Subject.eq(subject))
            .filter(reaction::Column::SubjectId.eq(subject_id))
            .filter(reaction::Column::UserId.eq(user_id))
            .exec(self.db())
            .await?;
        if removed.rows_affected == 0 {
            reaction::ActiveModel {
                id: NotSet,
                kind: Set(kind),
                subject: Set(subject),
                subject_id: Set(subject_id),
                user_id: Set(user_id),
                created_at: Set(now() as i64),
            }
            .insert(self.db())
            .await?;
        }
        self.reactions_for(kind, subject, subject_id).await
    }

    pub async fn reactions_for(
        &self,
        kind: reaction::Kind,
        subject: Subject,
        subject_id: i32,
    ) -> Result<Vec<reaction::Model>> {
        Ok(reaction::Entity::find()
            .filter(reaction::Column::Kind.eq(kind))
            .filter(reaction::Column::Subject.eq(subject))
            .filter(reaction::Column::SubjectId.eq(subject_id))
            .all(self.db())
            .await?)
    }

    // ==================== media ====================

    pub async fn attach_donation_media(
        &self,
        donation_id: i32,
        urls: Vec<String>,
    ) -> Result<Vec<String>> {
        let donation = self.get_donation(donation_id).await?;
        let mut media = donation.media_urls();
        media.extend(urls);
        let mut active: donation::ActiveModel = donation.into();
        active.media = Set(json!(media));
        active.updated_at = Set(now() as i64);
        active.update(self.db()).await?;
        Ok(media)
    }

    pub async fn donation_media(&self, donation_id: i32) -> Result<Vec<String>> {
        Ok(self.get_donation(donation_id).await?.media_urls())
    }

    /// remove by position; tells the media host to reclaim the asset first
    pub async fn remove_donation_media(
        &self,
        donation_id: i32,
        index: usize,
    ) -> Result<Vec<String>> {
        let donation = self.get_donation(donation_id).await?;
        let mut media = donation.media_urls();
        if index >= media.len() {
            return Err(Error::Validation("Invalid media index".to_owned()));
        }
        let url = media.remove(index);
        self.media.discard(&url).await?;
        let mut active: donation::ActiveModel = donation.into();
        active.media = Set(json!(media));
        active.updated_at = Set(now() as i64);
        active.update(self.db()).await?;
        Ok(media)
    }

    pub async fn attach_post_media(&self, post_id: i32, urls: Vec<String>) -> Result<Vec<String>> {
        let post = self.get_post(post_id).await?;
        let mut media = post.media_urls();
        media.extend(urls);
        let mut active: post::ActiveModel = post.into();
        active.media = Set(json!(media));
        active.updated_at = Set(now() as i64);
        active.update(self.db()).await?;
        Ok(media)
    }

    pub async fn post_media(&self, post_id: i32) -> Result<Vec<String>> {
        Ok(self.get_post(post_id).await?.media_urls())
    }

    pub async fn remove_post_media(&self, post_id: i32, index: usize) -> Result<Vec<String>> {
        let post = self.get_post(post_id).await?;
        let mut media = post.media_urls();
        if index >= media.len() {
            return Err(Error::Validation("Invalid media index".to_owned()));
        }
        let url = media.remove(index);
        self.media.discard(&url).await?;
        let mut active: post::ActiveModel = post.into();
        active.media = Set(json!(media));
        active.updated_at = Set(now() as i64);
        active.update(self.db()).await?;
        Ok(media)
    }

    // ==================== posts ====================

    pub async fn create_post(&self, data: NewPost) -> Result<post::Model> {
        self.get_user(data.author_id).await?;
        let time = now() as i64;
        Ok(post::ActiveModel {
            id: NotSet,
            title: Set(data.title),
            content: Set(data.content),
            author_id: Set(data.author_id),
            category: Set(data.category),
            status: Set(data.status.unwrap_or(post::Status::Draft)),
            media: Set(json!(data.media)),
            created_at: Set(time),
            updated_at: Set(time),
        }
        .insert(self.db())
        .await?)
    }

    pub async fn get_post(&self, id: i32) -> Result<post::Model> {
        post::Entity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or(Error::NotFound("Blog post"))
    }

    pub async fn list_posts(&self) -> Result<Vec<post::Model>> {
        Ok(post::Entity::find().all(self.db()).await?)
    }

    pub async fn posts_by_status(&self, status: post::Status) -> Result<Vec<post::Model>> {
        Ok(post::Entity::find()
            .filter(post::Column::Status.eq(status))
            .all(self.db())
            .await?)
    }

    pub async fn posts_by_category(&self, category: post::Category) -> Result<Vec<post::Model>> {
        Ok(post::Entity::find()
            .filter(post::Column::Category.eq(category))
            .all(self.db())
            .await?)
    }

    pub async fn posts_by_author(&self, author_id: i32) -> Result<Vec<post::Model>> {
        Ok(post::Entity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .all(self.db())
            .await?)
    }

    pub async fn update_post(&self, id: i32, patch: PostPatch) -> Result<post::Model> {
        let current = self.get_post(id).await?;
        let mut active: post::ActiveModel = current.into();
        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(content) = patch.content {
            active.content = Set(content);
        }
        if let Some(category) = patch.category {
            active.category = Set(category);
        }
        if let Some(status) = patch.status {
            active.status = Set(status);
        }
        active.updated_at = Set(now() as i64);
        Ok(active.update(self.db()).await?)
    }

    pub async fn delete_post(&self, id: i32) -> Result<()> {
        let txn = self.conn.begin().await?;
        let res = post::Entity::delete_by_id(id).exec(&txn).await?;
        if res.rows_affected != 1 {
            return Err(Error::NotFound("Blog post"));
        }
        report::Entity::delete_many()
            .filter(report::Column::Subject.eq(Subject::Post))
            .filter(report::Column::SubjectId.eq(id))
            .exec(&txn)
            .await?;
        comment::Entity::delete_many()
            .filter(comment::Column::Subject.eq(Subject::Post))
            .filter(comment::Column::SubjectId.eq(id))
            .exec(&txn)
            .await?;
        reaction::Entity::delete_many()
            .filter(reaction::Column::Subject.eq(Subject::Post))
            .filter(reaction::Column::SubjectId.eq(id))
            .exec(&txn)
            .await?;
        txn.commit().await?;
        Ok(())
    }

    // ==================== messages / chats ====================

    pub async fn create_message(&self, data: NewMessage) -> Result<message::Model> {
        if data.content.trim().is_empty() {
            return Err(Error::Validation("Message content is required".to_owned()));
        }
        Ok(message::ActiveModel {
            id: NotSet,
            sender_id: Set(data.sender_id),
            recipient_id: Set(data.recipient_id),
            content: Set(data.content),
            media: Set(json!(data.media)),
            chat_id: Set(data.chat_id),
            created_at: Set(now() as i64),
        }
        .insert(self.db())
        .await?)
    }

    pub async fn messages_for_user(&self, user_id: i32) -> Result<Vec<message::Model>> {
        Ok(message::Entity::find()
            .filter(
                Condition::any()
                    .add(message::Column::SenderId.eq(user_id))
                    .add(message::Column::RecipientId.eq(user_id)),
            )
            .order_by_desc(message::Column::CreatedAt)
            .all(self.db())
            .await?)
    }

    pub async fn get_message(&self, id: i32) -> Result<message::Model> {
        message::Entity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or(Error::NotFound("Message"))
    }

    pub async fn delete_message(&self, id: i32) -> Result<()> {
        let res = message::Entity::delete_by_id(id).exec(self.db()).await?;
        if res.rows_affected != 1 {
            return Err(Error::NotFound("Message"));
        }
        Ok(())
    }

    pub async fn create_chat(&self, member_ids: Vec<i32>) -> Result<chat::Model> {
        if member_ids.len() < 2 {
            return Err(Error::Validation(
                "A chat needs at least two members".to_owned(),
            ));
        }
        Ok(chat::ActiveModel {
            id: NotSet,
            members: Set(json!(member_ids)),
            created_at: Set(now() as i64),
        }
        .insert(self.db())
        .await?)
    }

    pub async fn chats_for_user(&self, user_id: i32) -> Result<Vec<chat::Model>> {
        // members is a json array, membership filtered here for portability
        let chats = chat::Entity::find().all(self.db()).await?;
        Ok(chats
            .into_iter()
            .filter(|c| c.member_ids().contains(&user_id))
            .collect())
    }

    // ==================== dashboard ====================

    /// `[user_count, donation_count, post_count, donor_count]`
    pub async fn dashboard_stats(&self) -> Result<[u64; 4]> {
        let users = user::Entity::find().count(self.db()).await?;
        let donations = donation::Entity::find().count(self.db()).await?;
        let posts = post::Entity::find().count(self.db()).await?;
        let donors = user::Entity::find()
            .filter(user::Column::Role.eq(user::Role::Donor))
            .count(self.db())
            .await?;
        Ok([users, donations, posts, donors])
    }
}

fn subject_name(subject: Subject) -> &'static str {
    match subject {
        Subject::Donation => "Donation",
        Subject::Post => "Blog post",
        Subject::User => "User",
    }
}
