use crate::domain::ports::TypeSolver;
use anyhow::Result;
use std::collections::HashSet;

/// Public top-level types of `java.lang`, visible by simple name in every unit.
const JAVA_LANG_TYPES: &[&str] = &[
    "AbstractMethodError", "Appendable", "ArithmeticException",
    "ArrayIndexOutOfBoundsException", "ArrayStoreException", "AssertionError", "AutoCloseable",
    "Boolean", "BootstrapMethodError", "Byte", "CharSequence", "Character", "Class",
    "ClassCastException", "ClassCircularityError", "ClassFormatError", "ClassLoader",
    "ClassNotFoundException", "ClassValue", "CloneNotSupportedException", "Cloneable",
    "Comparable", "Deprecated", "Double", "Enum", "EnumConstantNotPresentException", "Error",
    "Exception", "ExceptionInInitializerError", "Float", "FunctionalInterface",
    "IllegalAccessError", "IllegalAccessException", "IllegalArgumentException",
    "IllegalCallerException", "IllegalMonitorStateException", "IllegalStateException",
    "IllegalThreadStateException", "IncompatibleClassChangeError", "IndexOutOfBoundsException",
    "InheritableThreadLocal", "InstantiationError", "InstantiationException", "Integer",
    "InternalError", "InterruptedException", "Iterable", "LayerInstantiationException",
    "LinkageError", "Long", "MatchException", "Math", "Module", "ModuleLayer",
    "NegativeArraySizeException", "NoClassDefFoundError", "NoSuchFieldError",
    "NoSuchFieldException", "NoSuchMethodError", "NoSuchMethodException",
    "NullPointerException", "Number", "NumberFormatException", "Object", "OutOfMemoryError",
    "Override", "Package", "Process", "ProcessBuilder", "ProcessHandle", "Readable", "Record",
    "ReflectiveOperationException", "Runnable", "Runtime", "RuntimeException",
    "RuntimePermission", "SafeVarargs", "SecurityException", "SecurityManager", "Short",
    "StackOverflowError", "StackTraceElement", "StackWalker", "StrictMath", "String",
    "StringBuffer", "StringBuilder", "StringIndexOutOfBoundsException", "SuppressWarnings",
    "System", "Thread", "ThreadDeath", "ThreadGroup", "ThreadLocal", "Throwable",
    "TypeNotPresentException", "UnknownError", "UnsatisfiedLinkError",
    "UnsupportedClassVersionError", "UnsupportedOperationException", "VerifyError",
    "VirtualMachineError", "Void", "WrongThreadException",
];

/// Well-known types of the other packages the exclusion set names.
const JDK_TYPES: &[&str] = &[
    // java.util
    "java.util.AbstractList",
    "java.util.AbstractMap",
    "java.util.ArrayDeque",
    "java.util.ArrayList",
    "java.util.Arrays",
    "java.util.BitSet",
    "java.util.Calendar",
    "java.util.Collection",
    "java.util.Collections",
    "java.util.Comparator",
    "java.util.ConcurrentModificationException",
    "java.util.Date",
    "java.util.Deque",
    "java.util.EnumMap",
    "java.util.EnumSet",
    "java.util.HashMap",
    "java.util.HashSet",
    "java.util.Iterator",
    "java.util.LinkedHashMap",
    "java.util.LinkedHashSet",
    "java.util.LinkedList",
    "java.util.List",
    "java.util.ListIterator",
    "java.util.Locale",
    "java.util.Map",
    "java.util.NavigableMap",
    "java.util.NoSuchElementException",
    "java.util.Objects",
    "java.util.Optional",
    "java.util.OptionalInt",
    "java.util.PriorityQueue",
    "java.util.Properties",
    "java.util.Queue",
    "java.util.Random",
    "java.util.Scanner",
    "java.util.Set",
    "java.util.SortedMap",
    "java.util.SortedSet",
    "java.util.Stack",
    "java.util.StringJoiner",
    "java.util.Timer",
    "java.util.TreeMap",
    "java.util.TreeSet",
    "java.util.UUID",
    "java.util.Vector",
    "java.util.concurrent.ArrayBlockingQueue",
    "java.util.concurrent.BlockingQueue",
    "java.util.concurrent.Callable",
    "java.util.concurrent.CompletableFuture",
    "java.util.concurrent.CompletionStage",
    "java.util.concurrent.ConcurrentHashMap",
    "java.util.concurrent.ConcurrentLinkedQueue",
    "java.util.concurrent.ConcurrentMap",
    "java.util.concurrent.CopyOnWriteArrayList",
    "java.util.concurrent.CountDownLatch",
    "java.util.concurrent.CyclicBarrier",
    "java.util.concurrent.ExecutionException",
    "java.util.concurrent.Executor",
    "java.util.concurrent.ExecutorService",
    "java.util.concurrent.Executors",
    "java.util.concurrent.ForkJoinPool",
    "java.util.concurrent.Future",
    "java.util.concurrent.LinkedBlockingQueue",
    "java.util.concurrent.ScheduledExecutorService",
    "java.util.concurrent.Semaphore",
    "java.util.concurrent.ThreadLocalRandom",
    "java.util.concurrent.ThreadPoolExecutor",
    "java.util.concurrent.TimeUnit",
    "java.util.concurrent.TimeoutException",
    "java.util.concurrent.atomic.AtomicBoolean",
    "java.util.concurrent.atomic.AtomicInteger",
    "java.util.concurrent.atomic.AtomicLong",
    "java.util.concurrent.atomic.AtomicReference",
    "java.util.concurrent.locks.Lock",
    "java.util.concurrent.locks.ReentrantLock",
    "java.util.function.BiConsumer",
    "java.util.function.BiFunction",
    "java.util.function.Consumer",
    "java.util.function.Function",
    "java.util.function.Predicate",
    "java.util.function.Supplier",
    "java.util.function.UnaryOperator",
    "java.util.regex.Matcher",
    "java.util.regex.Pattern",
    "java.util.stream.Collectors",
    "java.util.stream.IntStream",
    "java.util.stream.Stream",
    // java.io
    "java.io.BufferedReader",
    "java.io.BufferedWriter",
    "java.io.ByteArrayInputStream",
    "java.io.ByteArrayOutputStream",
    "java.io.Closeable",
    "java.io.File",
    "java.io.FileInputStream",
    "java.io.FileNotFoundException",
    "java.io.FileOutputStream",
    "java.io.FileReader",
    "java.io.FileWriter",
    "java.io.IOException",
    "java.io.InputStream",
    "java.io.InputStreamReader",
    "java.io.ObjectInputStream",
    "java.io.ObjectOutputStream",
    "java.io.OutputStream",
    "java.io.PrintStream",
    "java.io.PrintWriter",
    "java.io.Reader",
    "java.io.Serializable",
    "java.io.StringReader",
    "java.io.StringWriter",
    "java.io.UncheckedIOException",
    "java.io.Writer",
    // java.math
    "java.math.BigDecimal",
    "java.math.BigInteger",
    "java.math.MathContext",
    "java.math.RoundingMode",
    // java.time
    "java.time.Clock",
    "java.time.DayOfWeek",
    "java.time.Duration",
    "java.time.Instant",
    "java.time.LocalDate",
    "java.time.LocalDateTime",
    "java.time.LocalTime",
    "java.time.Month",
    "java.time.OffsetDateTime",
    "java.time.Period",
    "java.time.ZoneId",
    "java.time.ZoneOffset",
    "java.time.ZonedDateTime",
    "java.time.format.DateTimeFormatter",
    "java.time.temporal.ChronoUnit",
    // java.text
    "java.text.DateFormat",
    "java.text.DecimalFormat",
    "java.text.MessageFormat",
    "java.text.NumberFormat",
    "java.text.ParseException",
    "java.text.SimpleDateFormat",
    // java.nio
    "java.nio.ByteBuffer",
    "java.nio.CharBuffer",
    "java.nio.charset.Charset",
    "java.nio.charset.StandardCharsets",
    "java.nio.file.DirectoryStream",
    "java.nio.file.Files",
    "java.nio.file.InvalidPathException",
    "java.nio.file.NoSuchFileException",
    "java.nio.file.Path",
    "java.nio.file.Paths",
    "java.nio.file.StandardOpenOption",
    // java.net
    "java.net.HttpURLConnection",
    "java.net.InetAddress",
    "java.net.InetSocketAddress",
    "java.net.MalformedURLException",
    "java.net.ServerSocket",
    "java.net.Socket",
    "java.net.URI",
    "java.net.URISyntaxException",
    "java.net.URL",
];

/// Reflection-only solver: answers from a fixed table of platform types
#[derive(Debug, Clone)]
pub struct JdkTypeSolver {
    known: HashSet<String>,
}

impl JdkTypeSolver {
    pub fn new() -> Self {
        let lang = JAVA_LANG_TYPES.iter().map(|name| format!("java.lang.{name}"));
        Self {
            known: lang.chain(JDK_TYPES.iter().map(|name| name.to_string())).collect(),
        }
    }
}

impl Default for JdkTypeSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeSolver for JdkTypeSolver {
    fn solve(&self, qualified_name: &str) -> Result<bool> {
        Ok(self.known.contains(qualified_name))
    }

    fn name(&self) -> &str {
        "jdk"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::exclusion::is_excluded_package;

    #[test]
    fn test_knows_platform_types() {
        let solver = JdkTypeSolver::new();
        assert!(solver.solve("java.lang.String").unwrap());
        assert!(solver.solve("java.util.List").unwrap());
        assert!(!solver.solve("java.util.Nope").unwrap());
        assert!(!solver.solve("com.acme.String").unwrap());
    }

    #[test]
    fn test_table_only_holds_excluded_packages() {
        for name in JDK_TYPES {
            assert!(is_excluded_package(name), "{name} outside the exclusion set");
        }
        for name in JAVA_LANG_TYPES {
            assert!(!name.contains('.'), "{name} is not a top-level simple name");
        }
    }

    #[test]
    fn test_knows_java_lang_exceptions_and_errors() {
        let solver = JdkTypeSolver::new();
        for name in [
            "java.lang.ArithmeticException",
            "java.lang.StringIndexOutOfBoundsException",
            "java.lang.ReflectiveOperationException",
            "java.lang.StackOverflowError",
            "java.lang.Appendable",
        ] {
            assert!(solver.solve(name).unwrap(), "{name} unknown");
        }
        assert!(solver.solve("java.util.concurrent.BlockingQueue").unwrap());
    }
}
