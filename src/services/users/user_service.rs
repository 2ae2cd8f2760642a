//! # 사용자 관리 서비스
//!
//! 사용자 계정의 생성, 조회, 수정, 삭제와 강사 승인 상태 변경을 담당합니다.
//! REST 핸들러와 `/instructors` 소켓 이벤트가 모두 이 서비스를 호출하므로
//! 검증 규칙과 브로드캐스트는 한 곳에서만 정의됩니다.
//!
//! ## 브로드캐스트
//!
//! | 작업 | `/users` | `/instructors` (강사일 때) | 기타 |
//! |------|----------|---------------------------|------|
//! | 생성 | `user-created` | `user-created` | |
//! | 수정 | `user-updated` | `user-updated` | |
//! | 삭제 | `user-deleted` | `user-deleted` (항상) | |
//! | 승인 상태 | `user-updated` | `user-updated`, `instructor-status-updated` | `/notifications`: `system-notification` |
//!
//! ## 비밀번호
//!
//! bcrypt 해시만 저장합니다. 해싱 비용은 생성 시 주입되며
//! 운영 환경에서는 `PasswordConfig::bcrypt_cost()` 값을 사용합니다.

use std::sync::Arc;

use bcrypt::{hash, verify};
use chrono::Utc;
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use validator::Validate;

use crate::core::errors::{parse_object_id, AppError, AppResult, ErrorContext};
use crate::domain::dto::{
    CreateUserRequest, InstructorStatusChanged, SystemNotice, UpdateUserRequest, UserResponse,
};
use crate::domain::entities::{InstructorStatus, Role, User};
use crate::realtime::{events, BroadcastHub, Change, Namespace};
use crate::repositories::{Entity, FieldFilter, Repository};
use crate::utils::string_utils::normalize_tags;

pub const USER_NOT_FOUND: &str = "Usuario no encontrado";
pub const INSTRUCTOR_NOT_FOUND: &str = "Instructor no encontrado";
pub const NOT_AN_INSTRUCTOR: &str = "El usuario no es un instructor";
pub const INVALID_STATUS: &str = "Estado no válido";
pub const INVALID_CREDENTIALS: &str = "Credenciales inválidas";

pub struct UserService {
    users: Arc<dyn Repository<User>>,
    hub: Arc<BroadcastHub>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(users: Arc<dyn Repository<User>>, hub: Arc<BroadcastHub>, bcrypt_cost: u32) -> Self {
        Self { users, hub, bcrypt_cost }
    }

    /// 전체 사용자 또는 `rol`이 일치하는 사용자
    pub async fn list(&self, rol: Option<&str>) -> AppResult<Vec<UserResponse>> {
        match rol.map(str::trim).filter(|r| !r.is_empty()) {
            None => {
                let users = self.users.find(None).await?;
                Ok(users.into_iter().map(UserResponse::from).collect())
            }
            Some(raw) => {
                let rol = Role::parse(raw)
                    .ok_or_else(|| AppError::ValidationError(format!("Rol no válido: {}", raw)))?;
                self.list_by_role(rol).await
            }
        }
    }

    pub async fn list_by_role(&self, rol: Role) -> AppResult<Vec<UserResponse>> {
        let filter = FieldFilter::eq("rol", rol.as_str());
        let users = self.users.find(Some(&filter)).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn get(&self, id: &str) -> AppResult<UserResponse> {
        let user = self.load(id, USER_NOT_FOUND).await?;
        Ok(UserResponse::from(user))
    }

    /// 토큰의 `sub`로 사용자 엔티티를 찾습니다.
    pub async fn find_entity(&self, id: &ObjectId) -> AppResult<Option<User>> {
        self.users.find_by_id(id).await
    }

    /// 문서 번호나 두 이메일 중 하나라도 이미 사용 중인지 확인
    pub async fn exists(&self, request: &CreateUserRequest) -> AppResult<bool> {
        let found = self
            .users
            .find_any(&[
                FieldFilter::eq("documento", request.documento.as_str()),
                FieldFilter::eq("correoInstitucional", request.correo_institucional.as_str()),
                FieldFilter::eq("correoPersonal", request.correo_personal.as_str()),
            ])
            .await?;
        Ok(found.is_some())
    }

    pub async fn create(&self, request: CreateUserRequest) -> AppResult<UserResponse> {
        request.validate()?;
        let start_time = std::time::Instant::now();

        let password_hash = hash(&request.password, self.bcrypt_cost)
            .context("비밀번호 해싱 실패")?;
        log::debug!("Password hashing took: {:?}", start_time.elapsed());

        let user = User::new(
            request.nombre.trim().to_string(),
            request.tipo_documento,
            request.documento.trim().to_string(),
            request.correo_institucional,
            request.correo_personal,
            password_hash,
            request.rol,
            normalize_tags(request.etiquetas),
            request.estado_instructor,
        );

        let created = self.users.insert(user).await?;
        log::info!("👤 사용자 생성: {} ({})", created.correo_institucional, created.rol.as_str());

        let response = UserResponse::from(created);
        self.publish(Change::Created, &response);
        Ok(response)
    }

    pub async fn update(&self, id: &str, changes: UpdateUserRequest) -> AppResult<UserResponse> {
        let user = self.load(id, USER_NOT_FOUND).await?;
        self.save_changes(user, changes).await
    }

    /// 태그 목록 전체 교체
    pub async fn replace_tags(&self, id: &str, etiquetas: Vec<String>) -> AppResult<UserResponse> {
        let changes = UpdateUserRequest {
            etiquetas: Some(etiquetas),
            ..Default::default()
        };
        self.update(id, changes).await
    }

    /// 강사 승인 상태 변경
    ///
    /// REST(`PUT /api/users/{id}/instructor-status`)와 소켓
    /// (`update-instructor-status`) 양쪽에서 사용하는 유일한 구현입니다.
    /// 대상이 강사가 아니거나 상태 값이 잘못되면 문서는 바뀌지 않습니다.
    pub async fn set_instructor_status(&self, id: &str, estado: &str) -> AppResult<UserResponse> {
        let user = self.load(id, INSTRUCTOR_NOT_FOUND).await?;

        if !user.is_instructor() {
            return Err(AppError::ValidationError(NOT_AN_INSTRUCTOR.to_string()));
        }

        let status = InstructorStatus::parse(estado)
            .ok_or_else(|| AppError::ValidationError(INVALID_STATUS.to_string()))?;

        let object_id = user.id.ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;
        let updated = self
            .users
            .set_fields(
                &object_id,
                doc! { "estadoInstructor": status.as_str(), "updatedAt": DateTime::now() },
            )
            .await?
            .ok_or_else(|| AppError::NotFound(INSTRUCTOR_NOT_FOUND.to_string()))?;

        log::info!("🎓 강사 상태 변경: {} → {}", updated.correo_institucional, status.as_str());

        let response = UserResponse::from(updated);
        self.publish(Change::Updated, &response);
        self.hub.publish(
            Namespace::Instructors,
            events::INSTRUCTOR_STATUS_UPDATED,
            &InstructorStatusChanged {
                instructor_id: response.id.clone(),
                status,
                timestamp: Utc::now(),
            },
        );
        self.hub.publish(
            Namespace::Notifications,
            events::SYSTEM_NOTIFICATION,
            &SystemNotice::info(format!(
                "El estado del instructor {} ha sido actualizado a {}",
                response.nombre,
                status.as_str()
            )),
        );

        Ok(response)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let user = self.load(id, USER_NOT_FOUND).await?;
        self.remove(user).await
    }

    /// 아이디와 비밀번호 확인
    ///
    /// `correo`는 기관 이메일과 개인 이메일 양쪽에 대조합니다.
    /// 존재하지 않는 계정과 틀린 비밀번호는 같은 메시지로 거부됩니다.
    pub async fn verify_credentials(&self, correo: &str, password: &str) -> AppResult<User> {
        let correo = correo.trim();
        let user = self
            .users
            .find_any(&[
                FieldFilter::eq("correoInstitucional", correo),
                FieldFilter::eq("correoPersonal", correo),
            ])
            .await?
            .ok_or_else(|| AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()))?;

        let matches = verify(password, &user.password)
            .context("비밀번호 검증 실패")?;

        if !matches {
            log::warn!("로그인 실패: {}", correo);
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        }

        Ok(user)
    }

    // ---- /instructors 네임스페이스 ----

    pub async fn list_instructors(&self) -> AppResult<Vec<UserResponse>> {
        self.list_by_role(Role::Instructor).await
    }

    pub async fn get_instructor(&self, id: &str) -> AppResult<UserResponse> {
        let user = self.load(id, INSTRUCTOR_NOT_FOUND).await?;
        if !user.is_instructor() {
            return Err(AppError::NotFound(INSTRUCTOR_NOT_FOUND.to_string()));
        }
        Ok(UserResponse::from(user))
    }

    /// 역할은 항상 `Instructor`, 상태는 항상 `pendiente`로 생성합니다.
    pub async fn create_instructor(&self, mut request: CreateUserRequest) -> AppResult<UserResponse> {
        request.rol = Role::Instructor;
        request.estado_instructor = Some(InstructorStatus::Pendiente);
        self.create(request).await
    }

    pub async fn update_instructor(&self, id: &str, changes: UpdateUserRequest) -> AppResult<UserResponse> {
        let user = self.load(id, INSTRUCTOR_NOT_FOUND).await?;
        if !user.is_instructor() {
            return Err(AppError::ValidationError(NOT_AN_INSTRUCTOR.to_string()));
        }
        self.save_changes(user, changes).await
    }

    pub async fn delete_instructor(&self, id: &str) -> AppResult<()> {
        let user = self.load(id, INSTRUCTOR_NOT_FOUND).await?;
        if !user.is_instructor() {
            return Err(AppError::ValidationError(NOT_AN_INSTRUCTOR.to_string()));
        }
        self.remove(user).await
    }

    async fn load(&self, id: &str, not_found: &str) -> AppResult<User> {
        let object_id = parse_object_id(id)?;
        self.users
            .find_by_id(&object_id)
            .await?
            .ok_or_else(|| AppError::NotFound(not_found.to_string()))
    }

    async fn save_changes(&self, mut user: User, changes: UpdateUserRequest) -> AppResult<UserResponse> {
        changes.validate()?;
        changes.apply(&mut user);
        user.touch();

        if !self.users.replace(&user).await? {
            return Err(AppError::NotFound(USER_NOT_FOUND.to_string()));
        }

        let response = UserResponse::from(user);
        self.publish(Change::Updated, &response);
        Ok(response)
    }

    async fn remove(&self, user: User) -> AppResult<()> {
        let object_id = user.id.ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;
        if !self.users.delete(&object_id).await? {
            return Err(AppError::NotFound(USER_NOT_FOUND.to_string()));
        }

        log::info!("🗑️ 사용자 삭제: {}", user.correo_institucional);

        let id = object_id.to_hex();
        self.hub.publish_change(Namespace::Users, Change::Deleted, &id);
        self.hub.publish_change(Namespace::Instructors, Change::Deleted, &id);
        Ok(())
    }

    fn publish(&self, change: Change, user: &UserResponse) {
        self.hub.publish_change(Namespace::Users, change, user);
        if user.rol == Role::Instructor {
            self.hub.publish_change(Namespace::Instructors, change, user);
        }
    }
}
