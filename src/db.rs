use anyhow::Context;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::models::{
    CandidateProfile, ClassificationResult, CulturalProfile, Team, TeamMember, TypeCode,
};

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<()> {
    let people = vec![
        ("Avery Lee", "avery.lee@hugo.team", "V1", "Platform"),
        ("Jules Moreno", "jules.moreno@hugo.team", "I2", "Platform"),
        ("Kiara Patel", "kiara.patel@hugo.team", "E1", "Platform"),
        ("Noah Fischer", "noah.fischer@hugo.team", "V3", "Growth"),
        ("Lena Wagner", "lena.wagner@hugo.team", "V2", "Growth"),
        ("Mika Sato", "mika.sato@hugo.team", "C1", ""),
        ("Sam Okafor", "sam.okafor@hugo.team", "C3", ""),
        ("Ines Romero", "ines.romero@hugo.team", "I3", ""),
        ("Tom Becker", "tom.becker@hugo.team", "E2", ""),
    ];

    for (name, email, hugo_type, team) in people {
        let person_id = upsert_person(pool, name, email, hugo_type).await?;
        if !team.is_empty() {
            let team_id = upsert_team(pool, team).await?;
            add_member(pool, team_id, person_id).await?;
        }
    }

    Ok(())
}

/// Re-importing a person refreshes the name but never replaces an assigned type.
const UPSERT_PERSON: &str = r#"
    INSERT INTO hugo.people (id, full_name, email, hugo_type)
    VALUES ($1, $2, $3, $4)
    ON CONFLICT (email) DO UPDATE
    SET full_name = EXCLUDED.full_name,
        hugo_type = COALESCE(NULLIF(hugo.people.hugo_type, ''), EXCLUDED.hugo_type)
    RETURNING id
"#;

const ASSIGN_FIRST_TYPE: &str = r#"
    UPDATE hugo.people SET hugo_type = $1
    WHERE id = $2 AND (hugo_type IS NULL OR hugo_type = '')
"#;

async fn upsert_person(
    pool: &PgPool,
    full_name: &str,
    email: &str,
    hugo_type: &str,
) -> anyhow::Result<Uuid> {
    let person_id: Uuid = sqlx::query(UPSERT_PERSON)
        .bind(Uuid::new_v4())
        .bind(full_name)
        .bind(email)
        .bind(hugo_type)
        .fetch_one(pool)
        .await?
        .get("id");

    Ok(person_id)
}

async fn upsert_team(pool: &PgPool, name: &str) -> anyhow::Result<Uuid> {
    let team_id: Uuid = sqlx::query(
        r#"
        INSERT INTO hugo.teams (id, name)
        VALUES ($1, $2)
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .fetch_one(pool)
    .await?
    .get("id");

    Ok(team_id)
}

/// Returns whether a new membership row was created.
async fn add_member(pool: &PgPool, team_id: Uuid, person_id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO hugo.team_members (team_id, person_id)
        VALUES ($1, $2)
        ON CONFLICT (team_id, person_id) DO NOTHING
        "#,
    )
    .bind(team_id)
    .bind(person_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Type that should be written to the person row, if any. Once a person has a
/// type it stays; later assessments are only kept as history.
fn first_assignment(existing: Option<&str>, assessed: TypeCode) -> Option<TypeCode> {
    match existing.map(str::trim) {
        Some(code) if !code.is_empty() => None,
        _ => Some(assessed),
    }
}

fn parse_profile(raw: Option<String>, owner: Uuid) -> anyhow::Result<Option<CulturalProfile>> {
    raw.filter(|text| !text.trim().is_empty())
        .map(|text| serde_json::from_str::<CulturalProfile>(&text))
        .transpose()
        .with_context(|| format!("person {owner} has an unreadable cultural profile"))
}

/// Loads a team with its typed members in join order.
pub async fn fetch_team(pool: &PgPool, name: &str) -> anyhow::Result<Team> {
    let team_id: Uuid = sqlx::query("SELECT id FROM hugo.teams WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await?
        .with_context(|| format!("team '{name}' not found"))?
        .get("id");

    let rows = sqlx::query(
        "SELECT p.id, p.full_name, p.hugo_type, p.cultural_profile \
         FROM hugo.team_members tm \
         JOIN hugo.people p ON p.id = tm.person_id \
         WHERE tm.team_id = $1 AND p.hugo_type IS NOT NULL AND p.hugo_type <> '' \
         ORDER BY tm.position",
    )
    .bind(team_id)
    .fetch_all(pool)
    .await?;

    let mut team = Team::new(team_id.to_string(), name);
    for row in rows {
        let id: Uuid = row.get("id");
        let code: String = row.get("hugo_type");
        team.members.push(TeamMember {
            id: id.to_string(),
            name: row.get("full_name"),
            personality_type: code
                .parse::<TypeCode>()
                .with_context(|| format!("member {id} has an invalid type"))?,
            cultural_profile: parse_profile(row.get("cultural_profile"), id)?,
        });
    }

    Ok(team)
}

/// Every assessed person who is not already on `team`.
pub async fn fetch_candidates(pool: &PgPool, team: &Team) -> anyhow::Result<Vec<CandidateProfile>> {
    let team_id = Uuid::parse_str(&team.id).context("team id is not a UUID")?;
    let rows = sqlx::query(
        "SELECT p.id, p.full_name, p.hugo_type, p.cultural_profile \
         FROM hugo.people p \
         WHERE p.hugo_type IS NOT NULL AND p.hugo_type <> '' \
         AND NOT EXISTS ( \
             SELECT 1 FROM hugo.team_members tm \
             WHERE tm.team_id = $1 AND tm.person_id = p.id) \
         ORDER BY p.id",
    )
    .bind(team_id)
    .fetch_all(pool)
    .await?;

    let mut candidates = Vec::new();
    for row in rows {
        let id: Uuid = row.get("id");
        let code: String = row.get("hugo_type");
        candidates.push(CandidateProfile {
            id: id.to_string(),
            name: row.get("full_name"),
            personality_type: code
                .parse::<TypeCode>()
                .with_context(|| format!("candidate {id} has an invalid type"))?,
            cultural_profile: parse_profile(row.get("cultural_profile"), id)?,
        });
    }

    Ok(candidates)
}

/// Appends an assessment row. The person's type is only filled in when they
/// have none yet; an existing type is left untouched.
pub async fn record_assessment(
    pool: &PgPool,
    email: &str,
    result: &ClassificationResult,
    assessed_on: NaiveDate,
) -> anyhow::Result<Uuid> {
    let person = sqlx::query("SELECT id, hugo_type FROM hugo.people WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?
        .with_context(|| format!("no person registered with email {email}"))?;
    let person_id: Uuid = person.get("id");
    let existing: Option<String> = person.get("hugo_type");

    let assessment_id = Uuid::new_v4();
    let scores = serde_json::to_string(&result.score_vector)?;

    let mut tx = pool.begin().await?;
    sqlx::query(
        r#"
        INSERT INTO hugo.assessments
        (id, person_id, hugo_type, score_vector, is_tie, assessed_on)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(assessment_id)
    .bind(person_id)
    .bind(result.hugo_type.as_str())
    .bind(scores)
    .bind(result.is_tie)
    .bind(assessed_on)
    .execute(&mut *tx)
    .await?;

    let assigned = first_assignment(existing.as_deref(), result.hugo_type);
    if let Some(code) = assigned {
        sqlx::query(ASSIGN_FIRST_TYPE)
            .bind(code.as_str())
            .bind(person_id)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    info!(
        %email,
        hugo_type = %result.hugo_type,
        assigned = assigned.is_some(),
        "recorded assessment"
    );
    Ok(assessment_id)
}

pub async fn import_csv(pool: &PgPool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        full_name: String,
        email: String,
        hugo_type: String,
        team: Option<String>,
    }

    let mut reader = csv::Reader::from_path(csv_path)?;
    let mut inserted = 0usize;

    for (line, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result?;
        let code = row
            .hugo_type
            .parse::<TypeCode>()
            .with_context(|| format!("row {} ({})", line + 1, row.email))?;
        let person_id = upsert_person(pool, &row.full_name, &row.email, code.as_str()).await?;

        let Some(team) = row.team.as_deref().map(str::trim).filter(|name| !name.is_empty()) else {
            continue;
        };
        let team_id = upsert_team(pool, team).await?;
        if add_member(pool, team_id, person_id).await? {
            inserted += 1;
        }
    }

    info!(inserted, path = %csv_path.display(), "imported team roster");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assessment_only_assigns_a_missing_type() {
        assert_eq!(first_assignment(None, TypeCode::C2), Some(TypeCode::C2));
        assert_eq!(first_assignment(Some(""), TypeCode::C2), Some(TypeCode::C2));
        assert_eq!(first_assignment(Some("  "), TypeCode::C2), Some(TypeCode::C2));
        assert_eq!(first_assignment(Some("V1"), TypeCode::C2), None);
        assert_eq!(first_assignment(Some("V1"), TypeCode::V1), None);
    }

    #[test]
    fn person_writes_keep_the_assigned_type() {
        assert!(UPSERT_PERSON
            .contains("hugo_type = COALESCE(NULLIF(hugo.people.hugo_type, ''), EXCLUDED.hugo_type)"));
        assert!(!UPSERT_PERSON.contains("hugo_type = EXCLUDED.hugo_type"));
        assert!(ASSIGN_FIRST_TYPE.contains("(hugo_type IS NULL OR hugo_type = '')"));
    }

    #[test]
    fn stored_profiles_are_optional() {
        let id = Uuid::nil();
        assert_eq!(parse_profile(None, id).unwrap(), None);
        assert_eq!(parse_profile(Some(String::new()), id).unwrap(), None);

        let profile = parse_profile(Some(r#"{"trusting":8.5}"#.to_string()), id)
            .unwrap()
            .unwrap();
        assert_eq!(profile.trusting, 8.5);
        assert_eq!(profile.leading, 5.0);

        assert!(parse_profile(Some("not json".to_string()), id).is_err());
    }
}
