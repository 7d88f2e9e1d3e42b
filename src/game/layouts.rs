//! Built-in pacman layouts.

pub const TEST_CLASSIC: &str = r#"
%%%%%
% . %
%.G.%
% . %
%. .%
%   %
%  .%
%   %
%P .%
%%%%%"#;

pub const MINIMAX_CLASSIC: &str = r#"
%%%%%%%%%
%.P    G%
% %.%G%%%
%G    %%%
%%%%%%%%%"#;

pub const TRAPPED_CLASSIC: &str = r#"
%%%%%%%%
%   P G%
%G%%%%%%
%....  %
%%%%%%%%"#;

pub const SMALL_CLASSIC: &str = r#"
%%%%%%%%%%%%%%%%%%%%
%......%G  G%......%
%.%%...%%  %%...%%.%
%.%o.%........%.o%.%
%.%%.%.%%%%%%.%.%%.%
%........P.........%
%%%%%%%%%%%%%%%%%%%%"#;

pub const NAMES: [&str; 4] = [
    "testClassic",
    "minimaxClassic",
    "trappedClassic",
    "smallClassic",
];

pub fn get(name: &str) -> Option<&'static str> {
    match name {
        "testClassic" => Some(TEST_CLASSIC),
        "minimaxClassic" => Some(MINIMAX_CLASSIC),
        "trappedClassic" => Some(TRAPPED_CLASSIC),
        "smallClassic" => Some(SMALL_CLASSIC),
        _ => None,
    }
}
