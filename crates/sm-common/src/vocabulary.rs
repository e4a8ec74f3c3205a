use std::collections::HashMap;
use std::sync::LazyLock;

/// Alias → canonical skill mapping (O(1) lookup).
///
/// This table is the extraction universe: a skill only ever enters a
/// report through one of these canonical names. Aliases that double as
/// common English words ("go", "express") are intentionally absent so the
/// extractor does not fire on ordinary prose; the longer forms still map.
static ALIASES: LazyLock<Vec<(&'static str, &'static [&'static str])>> = LazyLock::new(|| {
    let aliases: Vec<(&str, &[&str])> = vec![
        // JavaScript ecosystem
        (
            "javascript",
            &["js", "javascript", "java script", "ecmascript", "es6", "es2015"],
        ),
        ("typescript", &["ts", "typescript", "type script"]),
        ("nodejs", &["node.js", "node js", "nodejs", "node"]),
        (
            "react",
            &["reactjs", "react.js", "react js", "react", "react16", "react17", "react18"],
        ),
        ("vue", &["vue.js", "vuejs", "vue js", "vue", "vue2", "vue3"]),
        ("angular", &["angularjs", "angular.js", "angular", "angular2"]),
        ("svelte", &["sveltejs", "svelte.js", "svelte"]),
        ("nextjs", &["next.js", "nextjs", "next js"]),
        // CSS and styling
        ("css", &["css", "css3", "cascading style sheets"]),
        ("sass", &["scss", "sass"]),
        ("tailwind", &["tailwindcss", "tailwind css", "tailwind"]),
        ("bootstrap", &["bootstrap", "bootstrap4", "bootstrap5"]),
        // Backend frameworks
        (
            "spring",
            &["spring boot", "springboot", "spring framework", "spring"],
        ),
        (
            "django",
            &["django rest framework", "drf", "django framework", "django"],
        ),
        ("flask", &["flask framework", "python flask", "flask"]),
        (
            "expressjs",
            &["express.js", "expressjs", "express js", "express framework"],
        ),
        ("fastapi", &["fast api", "fastapi framework", "fastapi"]),
        ("rails", &["ruby on rails", "ror", "rails"]),
        ("laravel", &["laravel framework", "php laravel", "laravel"]),
        // APIs
        ("graphql", &["graph ql", "graphql"]),
        ("grpc", &["grpc", "g rpc"]),
        // Databases
        ("postgresql", &["postgres", "pg", "postgresql", "postgre sql"]),
        ("mysql", &["my sql", "mysql", "mariadb"]),
        ("mongodb", &["mongo", "mongo db", "mongodb"]),
        ("redis", &["redis cache", "redis db", "redis"]),
        ("elasticsearch", &["elastic search", "elasticsearch"]),
        ("sqlite", &["sqlite3", "sql lite", "sqlite"]),
        ("sql", &["sql", "structured query language"]),
        // Cloud platforms
        (
            "aws",
            &["amazon web services", "amazon aws", "aws cloud", "aws"],
        ),
        ("gcp", &["google cloud platform", "google cloud", "gcp"]),
        ("azure", &["microsoft azure", "ms azure", "azure cloud", "azure"]),
        ("firebase", &["google firebase", "firebase"]),
        // Programming languages
        ("python", &["python3", "python 3", "py", "python2.7", "python"]),
        ("java", &["java8", "java11", "java17", "openjdk", "java"]),
        ("csharp", &["c#", "c sharp", "csharp", ".net", "dotnet"]),
        ("cplusplus", &["c++", "cpp", "c plus plus"]),
        ("golang", &["golang", "go lang"]),
        ("rust", &["rust lang", "rust language", "rust"]),
        ("php", &["php7", "php8", "php"]),
        ("ruby", &["ruby lang", "ruby language", "ruby"]),
        ("swift", &["swift lang", "ios swift", "swift"]),
        ("kotlin", &["kotlin lang", "kotlin jvm", "kotlin"]),
        ("scala", &["scala lang", "scala"]),
        ("bash", &["bash", "shell scripting", "shell script"]),
        // DevOps and tools
        ("docker", &["containerization", "docker container", "docker"]),
        (
            "kubernetes",
            &["k8s", "kube", "kubernetes orchestration", "kubernetes"],
        ),
        ("jenkins", &["jenkins ci", "jenkins ci/cd", "jenkins"]),
        ("git", &["git scm", "github", "gitlab", "git"]),
        ("terraform", &["infrastructure as code", "iac", "terraform"]),
        ("ansible", &["configuration management", "ansible"]),
        ("linux", &["gnu/linux", "linux"]),
        // AI/ML
        ("ml", &["machine learning", "ml"]),
        ("deeplearning", &["deep learning", "neural networks", "deeplearning"]),
        ("nlp", &["natural language processing", "nlp"]),
        ("tensorflow", &["tensor flow", "tf", "tensorflow"]),
        ("pytorch", &["torch", "py torch", "pytorch"]),
        ("pandas", &["python pandas", "pandas"]),
        ("numpy", &["numerical python", "numpy"]),
        // Data and streaming
        ("spark", &["apache spark", "spark streaming", "spark"]),
        ("hadoop", &["apache hadoop", "hadoop ecosystem", "hadoop"]),
        ("kafka", &["apache kafka", "kafka streaming", "kafka"]),
        ("airflow", &["apache airflow", "airflow"]),
        // Testing frameworks
        ("jest", &["jest testing", "jest framework", "jest"]),
        ("cypress", &["cypress testing", "cypress"]),
        ("selenium", &["selenium webdriver", "selenium testing", "selenium"]),
        ("junit", &["junit testing", "junit"]),
        ("pytest", &["python testing", "py test", "pytest"]),
        // Mobile development
        (
            "reactnative",
            &["react native", "react-native", "reactnative"],
        ),
        ("flutter", &["flutter framework", "dart flutter", "flutter"]),
    ];
    aliases
});

/// Flat alias → canonical lookup built from [`ALIASES`].
pub static ALIAS_TO_CANONICAL: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        let mut map = HashMap::new();
        for (canonical, alias_list) in ALIASES.iter() {
            map.insert(*canonical, *canonical);
            for alias in *alias_list {
                map.insert(*alias, *canonical);
            }
        }
        map
    });

/// Same lookup keyed by separator-stripped form, so "node js" / "node-js" /
/// "node.js" land on one key. First alias wins on collisions.
pub static COMPACT_TO_CANONICAL: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for (alias, canonical) in ALIAS_TO_CANONICAL.iter() {
        map.entry(compact_key(alias)).or_insert(*canonical);
    }
    map
});

/// Strips separator characters after lowercasing; "Node.JS" and "node js"
/// share the compact key "nodejs".
pub fn compact_key(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | '.' | '-' | '_' | '/' | ','))
        .collect()
}

/// Iterator over every canonical skill in the vocabulary.
pub fn canonical_skills() -> impl Iterator<Item = &'static str> {
    ALIASES.iter().map(|(canonical, _)| *canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicals_map_to_themselves() {
        for canonical in canonical_skills() {
            assert_eq!(ALIAS_TO_CANONICAL.get(canonical), Some(&canonical));
        }
    }

    #[test]
    fn aliases_resolve_to_canonical() {
        assert_eq!(ALIAS_TO_CANONICAL.get("k8s"), Some(&"kubernetes"));
        assert_eq!(ALIAS_TO_CANONICAL.get("c#"), Some(&"csharp"));
        assert_eq!(ALIAS_TO_CANONICAL.get("amazon web services"), Some(&"aws"));
    }

    #[test]
    fn compact_key_strips_separators() {
        assert_eq!(compact_key("Node.JS"), "nodejs");
        assert_eq!(compact_key("react js"), "reactjs");
        assert_eq!(compact_key("c++"), "c++");
    }

    #[test]
    fn compact_map_covers_spacing_variants() {
        assert_eq!(COMPACT_TO_CANONICAL.get("nodejs"), Some(&"nodejs"));
        assert_eq!(
            COMPACT_TO_CANONICAL.get("amazonwebservices"),
            Some(&"aws")
        );
    }

    #[test]
    fn bare_go_is_not_an_alias() {
        // "go" fires on ordinary prose; only the unambiguous forms map.
        assert_eq!(ALIAS_TO_CANONICAL.get("go"), None);
        assert_eq!(ALIAS_TO_CANONICAL.get("golang"), Some(&"golang"));
    }
}
