//! Export lists for packages that are commonly dot-imported in test files.
//!
//! Only the current file is bound, so a dot-imported package's exports are
//! otherwise unknown. An unresolved identifier is first matched against
//! these lists; if no list claims it, it is attributed to the first dot
//! import of the file.

pub const GINKGO_V2_PATH: &str = "github.com/onsi/ginkgo/v2";
pub const GINKGO_V1_PATH: &str = "github.com/onsi/ginkgo";
pub const GOMEGA_PATH: &str = "github.com/onsi/gomega";

const GINKGO_EXPORTS: &[&str] = &[
    "AfterAll",
    "AfterEach",
    "AfterSuite",
    "BeforeAll",
    "BeforeEach",
    "BeforeSuite",
    "By",
    "Context",
    "DeferCleanup",
    "Describe",
    "DescribeTable",
    "Entry",
    "FContext",
    "FDescribe",
    "FDescribeTable",
    "FEntry",
    "FIt",
    "FSpecify",
    "FWhen",
    "Fail",
    "Focus",
    "GinkgoHelper",
    "GinkgoParallelProcess",
    "GinkgoRandomSeed",
    "GinkgoRecover",
    "GinkgoT",
    "GinkgoTB",
    "GinkgoWriter",
    "It",
    "JustAfterEach",
    "JustBeforeEach",
    "Label",
    "Offset",
    "Ordered",
    "PContext",
    "PDescribe",
    "PDescribeTable",
    "PEntry",
    "PIt",
    "PSpecify",
    "PWhen",
    "Pending",
    "RunSpecs",
    "Serial",
    "Skip",
    "SpecContext",
    "Specify",
    "SynchronizedAfterSuite",
    "SynchronizedBeforeSuite",
    "When",
    "XContext",
    "XDescribe",
    "XEntry",
    "XIt",
    "XSpecify",
    "XWhen",
];

const GOMEGA_EXPORTS: &[&str] = &[
    "And",
    "BeAssignableToTypeOf",
    "BeClosed",
    "BeElementOf",
    "BeEmpty",
    "BeEquivalentTo",
    "BeFalse",
    "BeIdenticalTo",
    "BeKeyOf",
    "BeNil",
    "BeNumerically",
    "BeTrue",
    "BeZero",
    "ConsistOf",
    "Consistently",
    "ContainElement",
    "ContainElements",
    "ContainSubstring",
    "Equal",
    "Eventually",
    "Expect",
    "HaveCap",
    "HaveEach",
    "HaveExactElements",
    "HaveField",
    "HaveKey",
    "HaveKeyWithValue",
    "HaveLen",
    "HaveOccurred",
    "HavePrefix",
    "HaveSuffix",
    "HaveValue",
    "MatchError",
    "MatchJSON",
    "MatchRegexp",
    "MatchYAML",
    "NewGomegaWithT",
    "NewWithT",
    "Not",
    "Or",
    "Panic",
    "PanicWith",
    "Receive",
    "RegisterFailHandler",
    "RegisterTestingT",
    "Satisfy",
    "SatisfyAll",
    "SatisfyAny",
    "Succeed",
    "WithTransform",
    "Ω",
];

/// Known exports of `path`, if the package is one we carry a list for.
pub fn known_exports(path: &str) -> Option<&'static [&'static str]> {
    match path {
        GINKGO_V2_PATH | GINKGO_V1_PATH => Some(GINKGO_EXPORTS),
        GOMEGA_PATH => Some(GOMEGA_EXPORTS),
        _ => None,
    }
}

/// Whether `path` is known to export `name`.
pub fn exports_name(path: &str, name: &str) -> bool {
    known_exports(path).is_some_and(|exports| exports.contains(&name))
}

/// Default local name for an import path: the last path element, skipping
/// a trailing major-version element (`/v2`) and dropping a `.vN` suffix
/// (`gopkg.in/yaml.v3`).
pub fn default_package_name(path: &str) -> &str {
    let mut segments = path.rsplit('/');
    let mut last = segments.next().unwrap_or(path);
    if is_major_version(last)
        && let Some(previous) = segments.next()
    {
        last = previous;
    }
    if let Some(dot) = last.rfind(".v")
        && last[dot + 2..].bytes().all(|b| b.is_ascii_digit())
        && dot + 2 < last.len()
    {
        last = &last[..dot];
    }
    last
}

fn is_major_version(segment: &str) -> bool {
    segment.len() > 1
        && segment.starts_with('v')
        && segment[1..].bytes().all(|b| b.is_ascii_digit())
}
