//! 역할별 데모 계정을 생성하는 시드 스크립트
//!
//! ```bash
//! PROFILE=dev cargo run --bin seed_users
//! ```
//!
//! 같은 문서 번호나 이메일을 가진 계정이 이미 있으면 건너뜁니다.

use std::process::ExitCode;
use std::sync::Arc;

use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use senacloud_api::config::PasswordConfig;
use senacloud_api::core::state::Stores;
use senacloud_api::db::Database;
use senacloud_api::domain::dto::CreateUserRequest;
use senacloud_api::domain::entities::{DocumentType, InstructorStatus, Role};
use senacloud_api::realtime::BroadcastHub;
use senacloud_api::services::UserService;

fn demo_user(
    nombre: &str,
    documento: &str,
    alias: &str,
    password: &str,
    etiquetas: &[&str],
    rol: Role,
    estado_instructor: Option<InstructorStatus>,
) -> CreateUserRequest {
    CreateUserRequest {
        nombre: nombre.to_string(),
        tipo_documento: DocumentType::CC,
        documento: documento.to_string(),
        correo_institucional: format!("{}@sena.edu.co", alias),
        correo_personal: format!("{}@gmail.com", alias),
        password: password.to_string(),
        rol,
        etiquetas: etiquetas.iter().map(|t| t.to_string()).collect(),
        estado_instructor,
    }
}

fn demo_users() -> Vec<CreateUserRequest> {
    vec![
        demo_user("Administrador", "1000000002", "admin", "admin123", &["Desarrollo", "Administración"], Role::Admin, None),
        demo_user("Coordinador", "1000000003", "coordinador", "coordinador123", &["Coordinación", "Gestión"], Role::Coordinacion, None),
        demo_user("Pedagogo", "1000000004", "pedagogo", "pedagogo123", &["Pedagogía", "Formación"], Role::EquipoPedagogico, None),
        demo_user(
            "Instructor Aprobado",
            "1000000005",
            "instructor.aprobado",
            "instructor123",
            &["Programación", "Desarrollo Web"],
            Role::Instructor,
            Some(InstructorStatus::Aprobado),
        ),
        demo_user(
            "Instructor Pendiente",
            "1000000006",
            "instructor.pendiente",
            "instructor123",
            &["Diseño", "UX/UI"],
            Role::Instructor,
            Some(InstructorStatus::Pendiente),
        ),
    ]
}

#[actix_web::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let database = match Database::new().await {
        Ok(database) => database,
        Err(e) => {
            error!("MongoDB 연결 실패: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let stores = Stores::mongo(&database);
    if let Err(e) = stores.ensure_indexes().await {
        error!("인덱스 생성 실패: {}", e);
        return ExitCode::FAILURE;
    }

    let users = UserService::new(stores.users, Arc::new(BroadcastHub::new(16)), PasswordConfig::bcrypt_cost());

    let mut created = 0;
    for request in demo_users() {
        let label = format!("{} ({})", request.nombre, request.rol.as_str());

        match users.exists(&request).await {
            Ok(true) => {
                info!("⏭️ 이미 존재: {}", label);
                continue;
            }
            Ok(false) => {}
            Err(e) => {
                error!("조회 실패 {}: {}", label, e);
                return ExitCode::FAILURE;
            }
        }

        match users.create(request).await {
            Ok(_) => {
                info!("👤 생성됨: {}", label);
                created += 1;
            }
            Err(e) => {
                error!("생성 실패 {}: {}", label, e);
                return ExitCode::FAILURE;
            }
        }
    }

    info!("✅ 시드 완료: {}명 생성", created);
    ExitCode::SUCCESS
}
