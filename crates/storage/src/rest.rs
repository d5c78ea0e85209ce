//! REST backend.
//!
//! All requests are sent with credentials so the session cookie is included.
//! A response with status 401 triggers a single token refresh followed by one
//! retry of the original request. If the refresh fails or the retry is
//! rejected again, the session is considered gone and the caller has to
//! redirect to the login page.

use chrono::NaiveDate;
use gloo_net::http::{Request, Response};
use serde_json::{Map, json};
use uuid::Uuid;
use vigor_domain as domain;

#[allow(async_fn_in_trait)]
pub trait SendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error>;
}

#[derive(Clone)]
pub struct GlooNetSendRequest;

impl SendRequest for GlooNetSendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error> {
        request.send().await
    }
}

#[derive(Clone)]
pub struct REST<S: SendRequest> {
    pub sender: S,
}

impl REST<GlooNetSendRequest> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sender: GlooNetSendRequest,
        }
    }
}

impl Default for REST<GlooNetSendRequest> {
    fn default() -> Self {
        Self::new()
    }
}

enum Error {
    NotFound,
    Conflict,
    Storage(domain::StorageError),
}

impl From<Error> for domain::ReadError {
    fn from(value: Error) -> Self {
        match value {
            Error::NotFound => domain::ReadError::NotFound,
            Error::Conflict => domain::ReadError::Other("conflict".into()),
            Error::Storage(err) => domain::ReadError::Storage(err),
        }
    }
}

impl From<Error> for domain::CreateError {
    fn from(value: Error) -> Self {
        match value {
            Error::Conflict => domain::CreateError::Conflict,
            Error::NotFound => domain::CreateError::Other("not found".into()),
            Error::Storage(err) => domain::CreateError::Storage(err),
        }
    }
}

impl From<Error> for domain::UpdateError {
    fn from(value: Error) -> Self {
        match value {
            Error::Conflict => domain::UpdateError::Conflict,
            Error::NotFound => domain::UpdateError::Other("not found".into()),
            Error::Storage(err) => domain::UpdateError::Storage(err),
        }
    }
}

impl From<Error> for domain::DeleteError {
    fn from(value: Error) -> Self {
        match value {
            Error::NotFound => domain::DeleteError::Other("not found".into()),
            Error::Conflict => domain::DeleteError::Other("conflict".into()),
            Error::Storage(err) => domain::DeleteError::Storage(err),
        }
    }
}

impl<S: SendRequest> REST<S> {
    async fn send(
        &self,
        build: impl Fn() -> Result<Request, gloo_net::Error>,
    ) -> Result<Response, Error> {
        let request = build().map_err(other)?;
        let response = self
            .sender
            .send_request(request)
            .await
            .map_err(|_| Error::Storage(domain::StorageError::NoConnection))?;

        if response.status() != 401 {
            return Ok(response);
        }

        let refresh_request = Request::post("auth/refresh")
            .credentials(web_sys::RequestCredentials::Include)
            .build()
            .map_err(other)?;
        let refresh_response = self
            .sender
            .send_request(refresh_request)
            .await
            .map_err(|_| Error::Storage(domain::StorageError::NoConnection))?;

        if !refresh_response.ok() {
            return Err(Error::Storage(domain::StorageError::NoSession));
        }

        let request = build().map_err(other)?;
        let response = self
            .sender
            .send_request(request)
            .await
            .map_err(|_| Error::Storage(domain::StorageError::NoConnection))?;

        if response.status() == 401 {
            return Err(Error::Storage(domain::StorageError::NoSession));
        }

        Ok(response)
    }

    async fn fetch<T>(
        &self,
        build: impl Fn() -> Result<Request, gloo_net::Error>,
    ) -> Result<T, Error>
    where
        T: 'static + for<'de> serde::Deserialize<'de>,
    {
        let response = self.send(build).await?;
        check_status(&response)?;
        response.json::<T>().await.map_err(other)
    }

    async fn fetch_no_content<T>(
        &self,
        build: impl Fn() -> Result<Request, gloo_net::Error>,
        result: T,
    ) -> Result<T, Error> {
        let response = self.send(build).await?;
        check_status(&response)?;
        Ok(result)
    }
}

fn check_status(response: &Response) -> Result<(), Error> {
    match response.status() {
        200..=299 => Ok(()),
        404 => Err(Error::NotFound),
        409 => Err(Error::Conflict),
        _ => Err(Error::Storage(domain::StorageError::Other(
            format!("{} {}", response.status(), response.status_text()).into(),
        ))),
    }
}

fn other(error: gloo_net::Error) -> Error {
    Error::Storage(domain::StorageError::Other(error.to_string().into()))
}

impl<S: SendRequest> domain::ProfileRepository for REST<S> {
    async fn read_profile(&self) -> Result<domain::Profile, domain::ReadError> {
        let profile: Profile = self
            .fetch(|| {
                Request::get("auth/me")
                    .credentials(web_sys::RequestCredentials::Include)
                    .build()
            })
            .await?;
        Ok(profile.into())
    }
}

impl<S: SendRequest> domain::ExerciseRepository for REST<S> {
    async fn read_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        let exercises: Vec<Exercise> = self
            .fetch(|| {
                Request::get("api/exercises")
                    .credentials(web_sys::RequestCredentials::Include)
                    .build()
            })
            .await?;
        exercises
            .into_iter()
            .map(domain::Exercise::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(domain::ReadError::Other)
    }

    async fn read_exercise(
        &self,
        id: domain::ExerciseID,
    ) -> Result<domain::Exercise, domain::ReadError> {
        let exercise: Exercise = self
            .fetch(|| {
                Request::get(&format!("api/exercises/{}", *id))
                    .credentials(web_sys::RequestCredentials::Include)
                    .build()
            })
            .await?;
        domain::Exercise::try_from(exercise).map_err(domain::ReadError::Other)
    }

    async fn create_exercise(
        &self,
        name: domain::Name,
        mode: domain::ExerciseMode,
        image_key: String,
        notes: Option<String>,
    ) -> Result<domain::Exercise, domain::CreateError> {
        let exercise: Exercise = self
            .fetch(|| {
                Request::post("api/exercises")
                    .credentials(web_sys::RequestCredentials::Include)
                    .json(&json!({
                        "name": name.to_string(),
                        "mode": mode.to_string(),
                        "image_key": image_key,
                        "notes": notes,
                    }))
            })
            .await?;
        domain::Exercise::try_from(exercise).map_err(domain::CreateError::Other)
    }

    async fn replace_exercise(
        &self,
        exercise: domain::Exercise,
    ) -> Result<domain::Exercise, domain::UpdateError> {
        let result: Exercise = self
            .fetch(|| {
                Request::put(&format!("api/exercises/{}", *exercise.id))
                    .credentials(web_sys::RequestCredentials::Include)
                    .json(&Exercise::from(&exercise))
            })
            .await?;
        domain::Exercise::try_from(result).map_err(domain::UpdateError::Other)
    }

    async fn delete_exercise(
        &self,
        id: domain::ExerciseID,
    ) -> Result<domain::ExerciseID, domain::DeleteError> {
        Ok(self
            .fetch_no_content(
                || {
                    Request::delete(&format!("api/exercises/{}", *id))
                        .credentials(web_sys::RequestCredentials::Include)
                        .build()
                },
                id,
            )
            .await?)
    }
}

impl<S: SendRequest> domain::ImageRepository for REST<S> {
    async fn request_image_upload(
        &self,
        file_name: &str,
        content_type: &str,
    ) -> Result<domain::UploadTarget, domain::CreateError> {
        let target: UploadTarget = self
            .fetch(|| {
                Request::post("api/exercises/upload-init")
                    .credentials(web_sys::RequestCredentials::Include)
                    .json(&json!({
                        "file_name": file_name,
                        "content_type": content_type,
                    }))
            })
            .await?;
        Ok(target.into())
    }

    async fn upload_image(
        &self,
        target: &domain::UploadTarget,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<(), domain::CreateError> {
        // The upload URL is pre-signed; no cookies, no refresh handling.
        let request = Request::put(&target.upload_url)
            .header("Content-Type", content_type)
            .body(js_sys::Uint8Array::from(data.as_slice()))
            .map_err(|err| domain::CreateError::Other(err.to_string().into()))?;
        let response = self
            .sender
            .send_request(request)
            .await
            .map_err(|_| domain::CreateError::Storage(domain::StorageError::NoConnection))?;

        if response.ok() {
            Ok(())
        } else {
            Err(domain::CreateError::Other(
                format!("{} {}", response.status(), response.status_text()).into(),
            ))
        }
    }
}

impl<S: SendRequest> domain::SessionRepository for REST<S> {
    async fn read_sessions(&self) -> Result<Vec<domain::Session>, domain::ReadError> {
        let sessions: Vec<Session> = self
            .fetch(|| {
                Request::get("api/sessions")
                    .credentials(web_sys::RequestCredentials::Include)
                    .build()
            })
            .await?;
        sessions
            .into_iter()
            .map(domain::Session::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(domain::ReadError::Other)
    }

    async fn read_session(
        &self,
        id: domain::SessionID,
    ) -> Result<domain::Session, domain::ReadError> {
        let session: Session = self
            .fetch(|| {
                Request::get(&format!("api/sessions/{}", *id))
                    .credentials(web_sys::RequestCredentials::Include)
                    .build()
            })
            .await?;
        domain::Session::try_from(session).map_err(domain::ReadError::Other)
    }

    async fn create_session(
        &self,
        name: domain::Name,
        items: Vec<domain::SessionItem>,
    ) -> Result<domain::Session, domain::CreateError> {
        let items = items.iter().map(SessionItem::from).collect::<Vec<_>>();
        let session: Session = self
            .fetch(|| {
                Request::post("api/sessions")
                    .credentials(web_sys::RequestCredentials::Include)
                    .json(&json!({
                        "name": name.to_string(),
                        "items": items,
                    }))
            })
            .await?;
        domain::Session::try_from(session).map_err(domain::CreateError::Other)
    }

    async fn modify_session(
        &self,
        id: domain::SessionID,
        name: Option<domain::Name>,
        items: Option<Vec<domain::SessionItem>>,
    ) -> Result<domain::Session, domain::UpdateError> {
        let mut content = Map::new();
        if let Some(name) = name {
            content.insert("name".into(), json!(name.to_string()));
        }
        if let Some(items) = items {
            content.insert(
                "items".into(),
                json!(items.iter().map(SessionItem::from).collect::<Vec<_>>()),
            );
        }
        let session: Session = self
            .fetch(|| {
                Request::patch(&format!("api/sessions/{}", *id))
                    .credentials(web_sys::RequestCredentials::Include)
                    .json(&content)
            })
            .await?;
        domain::Session::try_from(session).map_err(domain::UpdateError::Other)
    }

    async fn delete_session(
        &self,
        id: domain::SessionID,
    ) -> Result<domain::SessionID, domain::DeleteError> {
        Ok(self
            .fetch_no_content(
                || {
                    Request::delete(&format!("api/sessions/{}", *id))
                        .credentials(web_sys::RequestCredentials::Include)
                        .build()
                },
                id,
            )
            .await?)
    }
}

impl<S: SendRequest> domain::ProgramRepository for REST<S> {
    async fn read_programs(&self) -> Result<Vec<domain::Program>, domain::ReadError> {
        let programs: Vec<Program> = self
            .fetch(|| {
                Request::get("api/programs")
                    .credentials(web_sys::RequestCredentials::Include)
                    .build()
            })
            .await?;
        programs
            .into_iter()
            .map(domain::Program::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(domain::ReadError::Other)
    }

    async fn read_program(
        &self,
        id: domain::ProgramID,
    ) -> Result<domain::Program, domain::ReadError> {
        let program: Program = self
            .fetch(|| {
                Request::get(&format!("api/programs/{}", *id))
                    .credentials(web_sys::RequestCredentials::Include)
                    .build()
            })
            .await?;
        domain::Program::try_from(program).map_err(domain::ReadError::Other)
    }

    async fn create_program(
        &self,
        name: domain::Name,
        goal: Option<String>,
        weeks: domain::Weeks,
        sessions_per_week: domain::Slot,
    ) -> Result<domain::Program, domain::CreateError> {
        let program: Program = self
            .fetch(|| {
                Request::post("api/programs")
                    .credentials(web_sys::RequestCredentials::Include)
                    .json(&json!({
                        "name": name.to_string(),
                        "goal": goal,
                        "weeks": u32::from(weeks),
                        "sessions_per_week": u32::from(sessions_per_week),
                    }))
            })
            .await?;
        domain::Program::try_from(program).map_err(domain::CreateError::Other)
    }

    async fn modify_program(
        &self,
        id: domain::ProgramID,
        name: Option<domain::Name>,
        goal: Option<Option<String>>,
    ) -> Result<domain::Program, domain::UpdateError> {
        let mut content = Map::new();
        if let Some(name) = name {
            content.insert("name".into(), json!(name.to_string()));
        }
        if let Some(goal) = goal {
            content.insert("goal".into(), json!(goal));
        }
        let program: Program = self
            .fetch(|| {
                Request::patch(&format!("api/programs/{}", *id))
                    .credentials(web_sys::RequestCredentials::Include)
                    .json(&content)
            })
            .await?;
        domain::Program::try_from(program).map_err(domain::UpdateError::Other)
    }

    async fn delete_program(
        &self,
        id: domain::ProgramID,
    ) -> Result<domain::ProgramID, domain::DeleteError> {
        Ok(self
            .fetch_no_content(
                || {
                    Request::delete(&format!("api/programs/{}", *id))
                        .credentials(web_sys::RequestCredentials::Include)
                        .build()
                },
                id,
            )
            .await?)
    }

    async fn create_schedule_entry(
        &self,
        program_id: domain::ProgramID,
        entry: domain::ScheduleEntry,
    ) -> Result<domain::ScheduleEntry, domain::CreateError> {
        let entry = ScheduleEntry::from(&entry);
        let result: ScheduleEntry = self
            .fetch(|| {
                Request::post(&format!("api/programs/{}/schedule", *program_id))
                    .credentials(web_sys::RequestCredentials::Include)
                    .json(&entry)
            })
            .await?;
        Ok(result.into())
    }

    async fn modify_schedule_entry(
        &self,
        program_id: domain::ProgramID,
        entry: domain::ScheduleEntry,
    ) -> Result<domain::ScheduleEntry, domain::UpdateError> {
        let entry = ScheduleEntry::from(&entry);
        let result: ScheduleEntry = self
            .fetch(|| {
                Request::put(&format!(
                    "api/programs/{}/schedule/{}",
                    *program_id, entry.id
                ))
                .credentials(web_sys::RequestCredentials::Include)
                .json(&entry)
            })
            .await?;
        Ok(result.into())
    }

    async fn delete_schedule_entry(
        &self,
        program_id: domain::ProgramID,
        id: domain::ScheduleEntryID,
    ) -> Result<domain::ScheduleEntryID, domain::DeleteError> {
        Ok(self
            .fetch_no_content(
                || {
                    Request::delete(&format!("api/programs/{}/schedule/{}", *program_id, *id))
                        .credentials(web_sys::RequestCredentials::Include)
                        .build()
                },
                id,
            )
            .await?)
    }
}

impl<S: SendRequest> domain::WeightRepository for REST<S> {
    async fn read_weight_entries(&self) -> Result<Vec<domain::WeightEntry>, domain::ReadError> {
        let entries: Vec<WeightEntry> = self
            .fetch(|| {
                Request::get("api/weights")
                    .credentials(web_sys::RequestCredentials::Include)
                    .build()
            })
            .await?;
        entries
            .into_iter()
            .map(domain::WeightEntry::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(domain::ReadError::Other)
    }

    async fn create_weight_entry(
        &self,
        date: NaiveDate,
        weight: domain::BodyWeight,
        unit: domain::WeightUnit,
        notes: Option<String>,
    ) -> Result<domain::WeightEntry, domain::CreateError> {
        let entry: WeightEntry = self
            .fetch(|| {
                Request::post("api/weights")
                    .credentials(web_sys::RequestCredentials::Include)
                    .json(&json!({
                        "date": date,
                        "weight": f32::from(weight),
                        "unit": unit.to_string(),
                        "notes": notes,
                    }))
            })
            .await?;
        domain::WeightEntry::try_from(entry).map_err(domain::CreateError::Other)
    }

    async fn replace_weight_entry(
        &self,
        entry: domain::WeightEntry,
    ) -> Result<domain::WeightEntry, domain::UpdateError> {
        let result: WeightEntry = self
            .fetch(|| {
                Request::put(&format!("api/weights/{}", *entry.id))
                    .credentials(web_sys::RequestCredentials::Include)
                    .json(&WeightEntry::from(&entry))
            })
            .await?;
        domain::WeightEntry::try_from(result).map_err(domain::UpdateError::Other)
    }

    async fn delete_weight_entry(
        &self,
        id: domain::WeightEntryID,
    ) -> Result<domain::WeightEntryID, domain::DeleteError> {
        Ok(self
            .fetch_no_content(
                || {
                    Request::delete(&format!("api/weights/{}", *id))
                        .credentials(web_sys::RequestCredentials::Include)
                        .build()
                },
                id,
            )
            .await?)
    }
}

impl<S: SendRequest> domain::ExerciseWeightRepository for REST<S> {
    async fn read_exercise_weights(
        &self,
        exercise_id: Option<domain::ExerciseID>,
        session_id: Option<domain::SessionID>,
    ) -> Result<Vec<domain::ExerciseWeight>, domain::ReadError> {
        let mut query = vec![];
        if let Some(id) = exercise_id {
            query.push(format!("exercise_id={}", *id));
        }
        if let Some(id) = session_id {
            query.push(format!("session_id={}", *id));
        }
        let url = if query.is_empty() {
            "api/exercise-weights".to_string()
        } else {
            format!("api/exercise-weights?{}", query.join("&"))
        };
        let weights: Vec<ExerciseWeight> = self
            .fetch(|| {
                Request::get(&url)
                    .credentials(web_sys::RequestCredentials::Include)
                    .build()
            })
            .await?;
        weights
            .into_iter()
            .map(domain::ExerciseWeight::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(domain::ReadError::Other)
    }

    async fn create_exercise_weight(
        &self,
        exercise_id: domain::ExerciseID,
        session_id: domain::SessionID,
        set_number: u32,
        weight: domain::Load,
        reps: domain::Reps,
        unit: domain::WeightUnit,
        date: NaiveDate,
    ) -> Result<domain::ExerciseWeight, domain::CreateError> {
        let result: ExerciseWeight = self
            .fetch(|| {
                Request::post("api/exercise-weights")
                    .credentials(web_sys::RequestCredentials::Include)
                    .json(&json!({
                        "exercise_id": *exercise_id,
                        "session_id": *session_id,
                        "set_number": set_number,
                        "weight": f32::from(weight),
                        "reps": u32::from(reps),
                        "unit": unit.to_string(),
                        "date": date,
                    }))
            })
            .await?;
        domain::ExerciseWeight::try_from(result).map_err(domain::CreateError::Other)
    }

    async fn modify_exercise_weight(
        &self,
        id: domain::ExerciseWeightID,
        weight: Option<domain::Load>,
        reps: Option<domain::Reps>,
        unit: Option<domain::WeightUnit>,
    ) -> Result<domain::ExerciseWeight, domain::UpdateError> {
        let mut content = Map::new();
        if let Some(weight) = weight {
            content.insert("weight".into(), json!(f32::from(weight)));
        }
        if let Some(reps) = reps {
            content.insert("reps".into(), json!(u32::from(reps)));
        }
        if let Some(unit) = unit {
            content.insert("unit".into(), json!(unit.to_string()));
        }
        let result: ExerciseWeight = self
            .fetch(|| {
                Request::patch(&format!("api/exercise-weights/{}", *id))
                    .credentials(web_sys::RequestCredentials::Include)
                    .json(&content)
            })
            .await?;
        domain::ExerciseWeight::try_from(result).map_err(domain::UpdateError::Other)
    }

    async fn delete_exercise_weight(
        &self,
        id: domain::ExerciseWeightID,
    ) -> Result<domain::ExerciseWeightID, domain::DeleteError> {
        Ok(self
            .fetch_no_content(
                || {
                    Request::delete(&format!("api/exercise-weights/{}", *id))
                        .credentials(web_sys::RequestCredentials::Include)
                        .build()
                },
                id,
            )
            .await?)
    }

    async fn read_exercise_progression(
        &self,
        exercise_id: domain::ExerciseID,
    ) -> Result<domain::ExerciseProgression, domain::ReadError> {
        let progression: ExerciseProgression = self
            .fetch(|| {
                Request::get(&format!("api/exercises/{}/progression", *exercise_id))
                    .credentials(web_sys::RequestCredentials::Include)
                    .build()
            })
            .await?;
        domain::ExerciseProgression::try_from(progression).map_err(domain::ReadError::Other)
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Profile {
    pub sub: String,
    pub name: String,
    pub email: Option<String>,
}

impl From<Profile> for domain::Profile {
    fn from(value: Profile) -> Self {
        Self {
            subject: value.sub,
            name: value.name,
            email: value.email,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub mode: String,
    pub image_key: String,
    pub notes: Option<String>,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            mode: value.mode.to_string(),
            image_key: value.image_key.clone(),
            notes: value.notes.clone(),
        }
    }
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = Box<dyn std::error::Error>;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            mode: domain::ExerciseMode::try_from(value.mode.as_str())?,
            image_key: value.image_key,
            notes: value.notes,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct UploadTarget {
    pub upload_url: String,
    pub key: String,
}

impl From<UploadTarget> for domain::UploadTarget {
    fn from(value: UploadTarget) -> Self {
        Self {
            upload_url: value.upload_url,
            key: value.key,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Session {
    pub id: Uuid,
    pub name: String,
    pub items: Vec<SessionItem>,
}

impl From<&domain::Session> for Session {
    fn from(value: &domain::Session) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            items: value.items.iter().map(SessionItem::from).collect(),
        }
    }
}

impl TryFrom<Session> for domain::Session {
    type Error = Box<dyn std::error::Error>;

    fn try_from(value: Session) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            items: value
                .items
                .into_iter()
                .map(domain::SessionItem::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct SessionItem {
    pub exercise_id: Uuid,
    pub order: usize,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub duration: Option<u32>,
    pub rest: u32,
    pub notes: Option<String>,
}

impl From<&domain::SessionItem> for SessionItem {
    fn from(value: &domain::SessionItem) -> Self {
        Self {
            exercise_id: *value.exercise_id,
            order: value.order,
            sets: value.sets.map(u32::from),
            reps: value.reps.map(u32::from),
            duration: value.duration.map(u32::from),
            rest: value.rest.into(),
            notes: value.notes.clone(),
        }
    }
}

impl TryFrom<SessionItem> for domain::SessionItem {
    type Error = Box<dyn std::error::Error>;

    fn try_from(value: SessionItem) -> Result<Self, Self::Error> {
        Ok(Self {
            exercise_id: value.exercise_id.into(),
            order: value.order,
            sets: value.sets.map(domain::Sets::new).transpose()?,
            reps: value.reps.map(domain::Reps::new).transpose()?,
            duration: value.duration.map(domain::Duration::new).transpose()?,
            rest: domain::Rest::new(value.rest)?,
            notes: value.notes,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Program {
    pub id: Uuid,
    pub name: String,
    pub goal: Option<String>,
    pub weeks: u32,
    pub sessions_per_week: u32,
    pub schedule: Vec<ScheduleEntry>,
}

impl From<&domain::Program> for Program {
    fn from(value: &domain::Program) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            goal: value.goal.clone(),
            weeks: value.weeks.into(),
            sessions_per_week: value.sessions_per_week.into(),
            schedule: value.schedule.iter().map(ScheduleEntry::from).collect(),
        }
    }
}

impl TryFrom<Program> for domain::Program {
    type Error = Box<dyn std::error::Error>;

    fn try_from(value: Program) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            goal: value.goal,
            weeks: domain::Weeks::new(value.weeks)?,
            sessions_per_week: domain::Slot::new(value.sessions_per_week)?,
            schedule: value
                .schedule
                .into_iter()
                .map(domain::ScheduleEntry::from)
                .collect(),
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    pub id: Uuid,
    pub week: u32,
    pub slot: u32,
    pub session_id: Uuid,
}

impl From<&domain::ScheduleEntry> for ScheduleEntry {
    fn from(value: &domain::ScheduleEntry) -> Self {
        Self {
            id: *value.id,
            week: value.week,
            slot: value.slot,
            session_id: *value.session_id,
        }
    }
}

impl From<ScheduleEntry> for domain::ScheduleEntry {
    fn from(value: ScheduleEntry) -> Self {
        Self {
            id: value.id.into(),
            week: value.week,
            slot: value.slot,
            session_id: value.session_id.into(),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct WeightEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub weight: f32,
    pub unit: String,
    pub notes: Option<String>,
}

impl From<&domain::WeightEntry> for WeightEntry {
    fn from(value: &domain::WeightEntry) -> Self {
        Self {
            id: *value.id,
            date: value.date,
            weight: value.weight.into(),
            unit: value.unit.to_string(),
            notes: value.notes.clone(),
        }
    }
}

impl TryFrom<WeightEntry> for domain::WeightEntry {
    type Error = Box<dyn std::error::Error>;

    fn try_from(value: WeightEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            date: value.date,
            weight: domain::BodyWeight::new(value.weight)?,
            unit: domain::WeightUnit::try_from(value.unit.as_str())?,
            notes: value.notes,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct ExerciseWeight {
    pub id: Uuid,
    pub exercise_id: Uuid,
    pub session_id: Uuid,
    pub set_number: u32,
    pub weight: f32,
    pub reps: u32,
    pub unit: String,
    pub date: NaiveDate,
}

impl From<&domain::ExerciseWeight> for ExerciseWeight {
    fn from(value: &domain::ExerciseWeight) -> Self {
        Self {
            id: *value.id,
            exercise_id: *value.exercise_id,
            session_id: *value.session_id,
            set_number: value.set_number,
            weight: value.weight.into(),
            reps: value.reps.into(),
            unit: value.unit.to_string(),
            date: value.date,
        }
    }
}

impl TryFrom<ExerciseWeight> for domain::ExerciseWeight {
    type Error = Box<dyn std::error::Error>;

    fn try_from(value: ExerciseWeight) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            exercise_id: value.exercise_id.into(),
            session_id: value.session_id.into(),
            set_number: value.set_number,
            weight: domain::Load::new(value.weight)?,
            reps: domain::Reps::new(value.reps)?,
            unit: domain::WeightUnit::try_from(value.unit.as_str())?,
            date: value.date,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct ExerciseProgression {
    pub total_sessions: usize,
    pub sessions: Vec<ProgressionSession>,
}

impl TryFrom<ExerciseProgression> for domain::ExerciseProgression {
    type Error = Box<dyn std::error::Error>;

    fn try_from(value: ExerciseProgression) -> Result<Self, Self::Error> {
        Ok(Self {
            total_sessions: value.total_sessions,
            sessions: value
                .sessions
                .into_iter()
                .map(domain::ProgressionSession::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct ProgressionSession {
    pub session_id: Uuid,
    pub date: NaiveDate,
    pub weights: Vec<ExerciseWeight>,
}

impl TryFrom<ProgressionSession> for domain::ProgressionSession {
    type Error = Box<dyn std::error::Error>;

    fn try_from(value: ProgressionSession) -> Result<Self, Self::Error> {
        Ok(Self {
            session_id: value.session_id.into(),
            date: value.date,
            weights: value
                .weights
                .into_iter()
                .map(domain::ExerciseWeight::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::tests::data::{EXERCISE, EXERCISE_WEIGHT, PROGRAM, SESSION, WEIGHT_ENTRY};

    use super::*;

    #[test]
    fn test_exercise_conversion_round_trip() {
        let dto = Exercise::from(&*EXERCISE);
        assert_eq!(domain::Exercise::try_from(dto).unwrap(), EXERCISE.clone());
    }

    #[test]
    fn test_exercise_conversion_invalid_mode() {
        let mut dto = Exercise::from(&*EXERCISE);
        dto.mode = "weight".to_string();
        assert!(domain::Exercise::try_from(dto).is_err());
    }

    #[test]
    fn test_exercise_conversion_invalid_name() {
        let mut dto = Exercise::from(&*EXERCISE);
        dto.name = String::new();
        assert!(domain::Exercise::try_from(dto).is_err());
    }

    #[test]
    fn test_session_conversion_round_trip() {
        let dto = Session::from(&*SESSION);
        assert_eq!(domain::Session::try_from(dto).unwrap(), SESSION.clone());
    }

    #[rstest]
    #[case::sets(|item: &mut SessionItem| item.sets = Some(0))]
    #[case::reps(|item: &mut SessionItem| item.reps = Some(1000))]
    #[case::rest(|item: &mut SessionItem| item.rest = 10000)]
    fn test_session_conversion_invalid_item(#[case] corrupt: fn(&mut SessionItem)) {
        let mut dto = Session::from(&*SESSION);
        corrupt(&mut dto.items[0]);
        assert!(domain::Session::try_from(dto).is_err());
    }

    #[test]
    fn test_program_conversion_round_trip() {
        let dto = Program::from(&*PROGRAM);
        assert_eq!(domain::Program::try_from(dto).unwrap(), PROGRAM.clone());
    }

    #[test]
    fn test_exercise_weight_conversion_round_trip() {
        let dto = ExerciseWeight::from(&*EXERCISE_WEIGHT);
        assert_eq!(
            domain::ExerciseWeight::try_from(dto).unwrap(),
            EXERCISE_WEIGHT.clone()
        );
    }

    #[rstest]
    #[case::weight(|dto: &mut ExerciseWeight| dto.weight = 1000.0)]
    #[case::reps(|dto: &mut ExerciseWeight| dto.reps = 0)]
    #[case::unit(|dto: &mut ExerciseWeight| dto.unit = "stone".to_string())]
    fn test_exercise_weight_conversion_invalid(#[case] corrupt: fn(&mut ExerciseWeight)) {
        let mut dto = ExerciseWeight::from(&*EXERCISE_WEIGHT);
        corrupt(&mut dto);
        assert!(domain::ExerciseWeight::try_from(dto).is_err());
    }

    #[test]
    fn test_progression_conversion() {
        let dto = ExerciseProgression {
            total_sessions: 1,
            sessions: vec![ProgressionSession {
                session_id: *SESSION.id,
                date: EXERCISE_WEIGHT.date,
                weights: vec![ExerciseWeight::from(&*EXERCISE_WEIGHT)],
            }],
        };
        let progression = domain::ExerciseProgression::try_from(dto).unwrap();
        assert_eq!(progression.total_sessions, 1);
        assert_eq!(progression.sessions[0].weights, vec![EXERCISE_WEIGHT.clone()]);
    }

    #[test]
    fn test_weight_entry_conversion_round_trip() {
        let dto = WeightEntry::from(&*WEIGHT_ENTRY);
        assert_eq!(
            domain::WeightEntry::try_from(dto).unwrap(),
            WEIGHT_ENTRY.clone()
        );
    }

    #[test]
    fn test_weight_entry_conversion_invalid_unit() {
        let mut dto = WeightEntry::from(&*WEIGHT_ENTRY);
        dto.unit = "stone".to_string();
        assert!(domain::WeightEntry::try_from(dto).is_err());
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    mod wasm {
        use std::cell::RefCell;
        use std::collections::VecDeque;

        use pretty_assertions::assert_eq;
        use vigor_domain::{
            ExerciseRepository, ExerciseWeightRepository, ProfileRepository, ProgramRepository,
        };
        use wasm_bindgen_test::wasm_bindgen_test;

        use super::*;

        #[wasm_bindgen_test]
        async fn test_read_exercises_no_connection() {
            assert!(matches!(
                rest_with_responses(vec![]).read_exercises().await,
                Err(domain::ReadError::Storage(
                    domain::StorageError::NoConnection
                ))
            ));
        }

        #[wasm_bindgen_test]
        async fn test_read_exercises_ok() {
            assert_eq!(
                rest_with_responses(vec![
                    gloo_net::http::Response::builder()
                        .status(200)
                        .json(&vec![Exercise::from(&*EXERCISE)]),
                ])
                .read_exercises()
                .await
                .unwrap(),
                vec![EXERCISE.clone()]
            );
        }

        #[wasm_bindgen_test]
        async fn test_refresh_and_retry_on_401() {
            assert_eq!(
                rest_with_responses(vec![
                    status(401),
                    status(204),
                    gloo_net::http::Response::builder()
                        .status(200)
                        .json(&vec![Exercise::from(&*EXERCISE)]),
                ])
                .read_exercises()
                .await
                .unwrap(),
                vec![EXERCISE.clone()]
            );
        }

        #[wasm_bindgen_test]
        async fn test_no_session_when_refresh_fails() {
            assert!(matches!(
                rest_with_responses(vec![status(401), status(401)])
                    .read_exercises()
                    .await,
                Err(domain::ReadError::Storage(domain::StorageError::NoSession))
            ));
        }

        #[wasm_bindgen_test]
        async fn test_no_session_when_retry_rejected() {
            assert!(matches!(
                rest_with_responses(vec![status(401), status(204), status(401)])
                    .read_profile()
                    .await,
                Err(domain::ReadError::Storage(domain::StorageError::NoSession))
            ));
        }

        #[wasm_bindgen_test]
        async fn test_modify_schedule_entry_targets_existing_entry() {
            let entry = domain::ScheduleEntry {
                session_id: 2.into(),
                ..PROGRAM.schedule[0].clone()
            };
            let rest = rest_with_responses(vec![
                gloo_net::http::Response::builder()
                    .status(200)
                    .json(&ScheduleEntry::from(&entry)),
            ]);

            let result = rest
                .modify_schedule_entry(PROGRAM.id, entry.clone())
                .await
                .unwrap();

            assert_eq!(result, entry);
            // A single request addressing the entry itself, not the
            // schedule collection, so the cell keeps exactly one entry.
            let urls = rest.sender.requested_urls.borrow();
            assert_eq!(urls.len(), 1);
            assert!(urls[0].ends_with(&format!(
                "api/programs/{}/schedule/{}",
                *PROGRAM.id, *entry.id
            )));
        }

        #[wasm_bindgen_test]
        async fn test_read_exercise_weights_filters_by_session() {
            let rest = rest_with_responses(vec![
                gloo_net::http::Response::builder()
                    .status(200)
                    .json(&vec![ExerciseWeight::from(&*EXERCISE_WEIGHT)]),
            ]);

            assert_eq!(
                rest.read_exercise_weights(None, Some(SESSION.id))
                    .await
                    .unwrap(),
                vec![EXERCISE_WEIGHT.clone()]
            );
            let urls = rest.sender.requested_urls.borrow();
            assert!(urls[0].ends_with(&format!("api/exercise-weights?session_id={}", *SESSION.id)));
        }

        #[wasm_bindgen_test]
        async fn test_not_found() {
            assert!(matches!(
                rest_with_responses(vec![status(404)])
                    .read_exercise(EXERCISE.id)
                    .await,
                Err(domain::ReadError::NotFound)
            ));
        }

        fn status(status: u16) -> Result<gloo_net::http::Response, gloo_net::Error> {
            gloo_net::http::Response::builder()
                .status(status)
                .body::<Option<&str>>(None)
        }

        fn rest_with_responses(
            responses: Vec<Result<gloo_net::http::Response, gloo_net::Error>>,
        ) -> REST<MockSendRequest> {
            REST {
                sender: MockSendRequest {
                    responses: RefCell::new(responses.into()),
                    requested_urls: RefCell::new(vec![]),
                },
            }
        }

        struct MockSendRequest {
            responses: RefCell<VecDeque<Result<gloo_net::http::Response, gloo_net::Error>>>,
            requested_urls: RefCell<Vec<String>>,
        }

        impl SendRequest for MockSendRequest {
            async fn send_request(
                &self,
                request: Request,
            ) -> Result<Response, gloo_net::Error> {
                self.requested_urls.borrow_mut().push(request.url());
                self.responses
                    .borrow_mut()
                    .pop_front()
                    .unwrap_or(Err(gloo_net::Error::GlooError("no response".to_string())))
            }
        }
    }
}
