use crate::models::{CandidateProfile, Team, TeamMember, TypeCode};

pub fn team_of(codes: &[TypeCode]) -> Team {
    let mut team = Team::new("team-1", "Sample");
    for (idx, code) in codes.iter().enumerate() {
        team.members.push(TeamMember {
            id: format!("m{idx}"),
            name: format!("Member {idx}"),
            personality_type: *code,
            cultural_profile: None,
        });
    }
    team
}

pub fn candidate(id: &str, code: TypeCode) -> CandidateProfile {
    CandidateProfile {
        id: id.to_string(),
        name: format!("Candidate {id}"),
        personality_type: code,
        cultural_profile: None,
    }
}
