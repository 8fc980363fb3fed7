//! Fixed sample datasets.
//!
//! - [`sample_commands`] is served in degraded mode when the backend fails
//!   with a known database scan defect.
//! - [`sample_workers`] seeds demo views and tests.
//! - [`sample_worker_profile`] is the profile every non-admin login sees.

use crate::models::{ServiceOrder, UNSPECIFIED, WorkerApplication, WorkerProfile};
use crate::types::{CommandId, CommandStatus, WorkerId};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

/// The two built-in service orders.
#[must_use]
pub fn sample_commands() -> Vec<ServiceOrder> {
    vec![
        ServiceOrder {
            id: CommandId::new("cmd-001"),
            name: "أحمد محمد علي".to_owned(),
            phone: "0123456789".to_owned(),
            email: "ahmed.mohamed@email.com".to_owned(),
            floor: UNSPECIFIED.to_owned(),
            item_type: UNSPECIFIED.to_owned(),
            services: strings(&["cleaning", "delivery"]),
            workers: "3".to_owned(),
            start: "القاهرة - مصر الجديدة".to_owned(),
            end: "الإسكندرية - سموحة".to_owned(),
            price: "2500".to_owned(),
            status: CommandStatus::Pending,
            created_at: "2024-01-15T10:30:00Z".to_owned(),
            description: "نقل أثاث من شقة إلى شقة أخرى مع تنظيف شامل".to_owned(),
        },
        ServiceOrder {
            id: CommandId::new("cmd-002"),
            name: "فاطمة أحمد حسن".to_owned(),
            phone: "0987654321".to_owned(),
            email: "fatima.ahmed@email.com".to_owned(),
            floor: UNSPECIFIED.to_owned(),
            item_type: UNSPECIFIED.to_owned(),
            services: strings(&["cleaning"]),
            workers: "2".to_owned(),
            start: "الجيزة - الدقي".to_owned(),
            end: "الجيزة - الدقي".to_owned(),
            price: "800".to_owned(),
            status: CommandStatus::Approved,
            created_at: "2024-01-14T14:20:00Z".to_owned(),
            description: "تنظيف شقة 3 غرف نوم بعد السكن".to_owned(),
        },
    ]
}

/// Two demo worker applications: one pending, one approved.
#[must_use]
pub fn sample_workers() -> Vec<WorkerApplication> {
    vec![
        WorkerApplication {
            id: WorkerId::new("worker-001"),
            name: "محمد علي أحمد".to_owned(),
            email: "mohamed.ali@email.com".to_owned(),
            phone: "0111222333".to_owned(),
            position: "عامل تنظيف".to_owned(),
            experience: "5 سنوات".to_owned(),
            message: "لدي خبرة في تنظيف المنازل والمكاتب والفلل".to_owned(),
            is_accepted: None,
            created_at: "2024-01-13T09:15:00Z".to_owned(),
        },
        WorkerApplication {
            id: WorkerId::new("worker-002"),
            name: "علي حسن محمد".to_owned(),
            email: "ali.hassan@email.com".to_owned(),
            phone: "0444555666".to_owned(),
            position: "سائق نقل".to_owned(),
            experience: "8 سنوات".to_owned(),
            message: "سائق محترف مع رخصة نقل أثاث ومركبات ثقيلة".to_owned(),
            is_accepted: Some(true),
            created_at: "2024-01-12T16:45:00Z".to_owned(),
        },
    ]
}

/// The fixed profile shown after any non-admin login.
#[must_use]
pub fn sample_worker_profile() -> WorkerProfile {
    WorkerProfile {
        application: WorkerApplication {
            id: WorkerId::new("worker-001"),
            name: "محمد علي أحمد".to_owned(),
            email: "mohamed.ali@email.com".to_owned(),
            phone: "0111222333".to_owned(),
            position: "عامل تنظيف محترف".to_owned(),
            experience: "خبرة 5 سنوات في تنظيف المنازل والمكاتب والفلل. متخصص في التنظيف العميق والتعقيم".to_owned(),
            message: "أرغب في الانضمام لفريق KRIXO المتميز. لدي خبرة واسعة في مجال التنظيف وأتميز بالدقة والموثوقية. أعمل بجد وألتزم بمواعيد العمل بدقة.".to_owned(),
            is_accepted: Some(true),
            created_at: "2024-01-13T09:15:00Z".to_owned(),
        },
        skills: strings(&[
            "تنظيف المنازل",
            "تنظيف المكاتب",
            "التعقيم",
            "تنظيف السجاد",
            "تنظيف النوافذ",
        ]),
        languages: strings(&["العربية", "الإنجليزية"]),
        availability: "متاح للعمل بدوام كامل".to_owned(),
        salary: "2000-2500 دج شهرياً".to_owned(),
        location: "القاهرة - مصر الجديدة".to_owned(),
    }
}
