use anyhow::Result;
use tracing::info;

use crate::db::Store;
use crate::models::{NewClient, NewProject, ProjectStatus};

/// Sample clients, each paired with the projects it owns
const SAMPLE: &[(&str, &str, &str, &[(&str, &str, ProjectStatus)])] = &[
    (
        "Tony Stark",
        "tonystark@email.com",
        "123-456-456",
        &[("eCommerce website", "Storefront with cart and checkout", ProjectStatus::InProgress)],
    ),
    (
        "Sam Will",
        "samwill012@email.com",
        "985-456-476",
        &[("Medical website", "Appointment booking for a clinic", ProjectStatus::NotStarted)],
    ),
    (
        "Danial",
        "danial456@email.com",
        "176-123-476",
        &[("Animals website", "Adoption listings for a shelter", ProjectStatus::InProgress)],
    ),
    (
        "Cristina",
        "cristina123@email.com",
        "462-854-476",
        &[("Food website", "Menu and ordering for a restaurant", ProjectStatus::NotStarted)],
    ),
    (
        "Diana Matt",
        "dianamatt88@email.com",
        "157-456-476",
        &[("Health website", "Fitness tracking dashboard", ProjectStatus::Completed)],
    ),
];

/// Insert the sample clients and their projects
///
/// Returns the number of clients and projects created.
pub async fn seed(store: &dyn Store) -> Result<(usize, usize)> {
    let mut clients = 0;
    let mut projects = 0;

    for (name, email, phone, owned) in SAMPLE {
        let client = store
            .create_client(NewClient {
                name: name.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
            })
            .await?;
        clients += 1;

        for (project_name, description, status) in owned.iter() {
            store
                .create_project(NewProject {
                    name: project_name.to_string(),
                    description: description.to_string(),
                    status: *status,
                    client_id: client.id,
                })
                .await?;
            projects += 1;
        }
    }

    info!(clients, projects, "sample data inserted");

    Ok((clients, projects))
}
