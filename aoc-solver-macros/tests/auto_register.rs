use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder,
};

/// Counts ids with a letter appearing exactly twice / exactly three times
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2034, day = 24, tags = ["test", "ids"])]
struct BoxIds;

impl AocParser for BoxIds {
    type SharedData<'a> = Vec<[u8; 26]>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .map(|line| {
                let mut counts = [0u8; 26];
                for b in line.bytes() {
                    if !b.is_ascii_lowercase() {
                        return Err(ParseError::InvalidFormat(format!("bad id {line:?}")));
                    }
                    counts[(b - b'a') as usize] += 1;
                }
                Ok(counts)
            })
            .collect()
    }
}

impl PartSolver<1> for BoxIds {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().filter(|c| c.contains(&2)).count().to_string())
    }
}

impl PartSolver<2> for BoxIds {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().filter(|c| c.contains(&3)).count().to_string())
    }
}

/// Single-part solver registered without tags
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2034, day = 25)]
struct Untagged;

impl AocParser for Untagged {
    type SharedData<'a> = usize;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input.len())
    }
}

impl PartSolver<1> for Untagged {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.to_string())
    }
}

const INPUT: &str = "abcdef\nbababc\nabbcde\nabcccd\naabcdd\nabcdee\nababab";

#[test]
fn test_derived_solver_auto_registers() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .expect("Failed to register plugins")
        .build();

    let mut solver = registry
        .create_solver(2034, 24, INPUT)
        .expect("Failed to create solver - was it registered?");

    assert_eq!(solver.parts(), 2);
    assert_eq!(solver.solve(1).unwrap().answer, "4");
    assert_eq!(solver.solve(2).unwrap().answer, "3");
}

#[test]
fn test_tag_filter_selects_plugins() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"ids"))
        .unwrap()
        .build();

    assert!(registry.storage().contains(2034, 24));
    assert!(!registry.storage().contains(2034, 25));
}

#[test]
fn test_untagged_plugin_parts() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.year == 2034 && plugin.day == 25)
        .unwrap()
        .build();

    let info = registry.storage().get_info(2034, 25).unwrap();
    assert_eq!(info.parts, 1);

    let mut solver = registry.create_solver(2034, 25, "abc").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "3");
}

#[test]
fn test_parse_error_surfaces_from_registry() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"test"))
        .unwrap()
        .build();

    assert!(matches!(
        registry.create_solver(2034, 24, "ABC"),
        Err(aoc_solver::SolverError::ParseError(ParseError::InvalidFormat(_)))
    ));
}
