use glot_schema::{translate, LanguageSet, Type};
use insta::assert_snapshot;

#[test]
fn dsl_rendering_of_deep_tree() {
    let ty = Type::map(
        Type::integer(),
        Type::list(Type::tuple(vec![Type::string(), Type::double()])),
    );
    assert_snapshot!(ty.to_string(), @"map<integer;list<tuple<string|double>>>");
}

#[test]
fn cpp_rendering_of_deep_tree() {
    let langs = LanguageSet::builtin();
    let cpp = langs.get("C++").unwrap();
    let ty = Type::map(
        Type::integer(),
        Type::list(Type::tuple(vec![Type::string(), Type::double()])),
    );
    assert_snapshot!(translate(cpp, &ty).unwrap(), @"map<int,vector<tuple<string,double>>>");
}

#[test]
fn every_language_renders_the_same_schema() {
    let langs = LanguageSet::builtin();
    let ty = Type::list(Type::map(Type::string(), Type::long()));
    let rendered: Vec<String> = langs
        .names()
        .map(|name| {
            let spec = langs.get(name).unwrap();
            format!("{}: {}", name, translate(spec, &ty).unwrap())
        })
        .collect();
    assert_snapshot!(rendered.join("\n"), @r"
    C++: vector<map<string,long long>>
    Go: []map[string]int64
    Java: ArrayList<HashMap<String, Long>>
    Kotlin: List<Map<String, Long>>
    Rust: Vec<HashMap<String, i64>>
    TypeScript: Array<Map<string, number>>
    ");
}
