//! Deterministic simulated dataset served while in offline mode
//!
//! Shapes match the live path exactly (pagination, search) so list views can
//! render transparently whether the data is live or simulated; only the
//! offline indicator differs.

use edulink_domain::{CanonicalCourse, CanonicalUser, Page};

/// Fixed catalog of sample courses.
pub fn sample_courses() -> Vec<CanonicalCourse> {
    let seed = [
        ("9001", "Financial Accounting Fundamentals", 1890.0, 189.0, "6 months"),
        ("9002", "Business Administration Essentials", 2290.0, 229.0, "8 months"),
        ("9003", "Human Resources Management", 1590.0, 159.0, "5 months"),
        ("9004", "Digital Marketing Strategy", 1290.0, 129.0, "4 months"),
        ("9005", "Project Management in Practice", 1990.0, 199.0, "6 months"),
        ("9006", "Data Analysis for Managers", 2490.0, 249.0, "9 months"),
    ];

    seed.iter()
        .map(|(external_id, title, total, monthly, duration)| CanonicalCourse {
            id: String::new(),
            title: (*title).to_string(),
            description: format!("{title} - simulated catalog entry"),
            image_url: format!("https://cdn.edulink.local/courses/{external_id}.png"),
            price_total: *total,
            price_monthly: *monthly,
            duration_label: (*duration).to_string(),
            external_id: (*external_id).to_string(),
        })
        .collect()
}

/// Fixed roster of sample students.
pub fn sample_users() -> Vec<CanonicalUser> {
    let seed = [
        ("8001", "Ana", "Souza", "ana.souza@example.com"),
        ("8002", "Bruno", "Lima", "bruno.lima@example.com"),
        ("8003", "Carla", "Mendes", "carla.mendes@example.com"),
        ("8004", "Diego", "Ferreira", "diego.ferreira@example.com"),
        ("8005", "Elisa", "Rocha", "elisa.rocha@example.com"),
    ];

    seed.iter()
        .map(|(external_id, first, last, email)| CanonicalUser {
            id: String::new(),
            first_name: (*first).to_string(),
            last_name: (*last).to_string(),
            email: (*email).to_string(),
            phone: String::new(),
            tax_id: String::new(),
            external_id: (*external_id).to_string(),
            offline: false,
        })
        .collect()
}

/// Slice a filtered item list into the same page envelope the live path
/// produces. `page` is 1-based; out-of-range pages yield empty item lists
/// with intact totals.
pub fn paginate<T: Clone>(items: &[T], page: u32, page_size: u32) -> Page<T> {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let total_items = items.len() as u32;
    let total_pages = total_items.div_ceil(page_size);

    // Widen before multiplying; adversarial page numbers from the UI must
    // land on an empty page, not overflow.
    let start = u64::from(page - 1) * u64::from(page_size);
    let start = usize::try_from(start).unwrap_or(usize::MAX);
    let page_items =
        items.iter().skip(start).take(page_size as usize).cloned().collect::<Vec<_>>();

    Page { items: page_items, page, total_pages, total_items }
}

/// Case-insensitive substring match used for simulated search.
pub fn matches_term(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(&term.to_lowercase())
}
