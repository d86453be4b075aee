//! Domain Vocabulary - the closed enumerations of the scene specification
//!
//! Every enumerable field in every pipeline document draws its value from one
//! of these sets. The prompt builders inline the exact wire strings from here,
//! so the instruction text and the validating schema can never drift apart.

use serde::{Deserialize, Serialize};

/// Declares a closed vocabulary enum with exact wire strings.
///
/// Each generated enum carries `ALL` (declaration order) and `as_str()`, which
/// are what the prompt builders use to restate the vocabulary inline.
macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[doc = $wire]
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every admissible value, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// The exact wire string for this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            /// Wire strings for the whole vocabulary, in declaration order.
            pub fn wire_names() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.as_str()).collect()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use vocabulary;

vocabulary! {
    /// High-level family of task.
    TaskCategory {
        PickPlace => "Pick Place",
        Navigation => "Navigation",
        Manipulation => "Manipulation",
        Assembly => "Assembly",
        InspectionMaintenance => "Inspection/Maintenance",
        Fabrication => "Fabrication",
        Hri => "HRI",
        Other => "Other",
    }
}

vocabulary! {
    /// More specific class of task within a category.
    TaskSubcategory {
        BinPicking => "bin picking",
        PartAssemblyDisassembly => "part assembly/disassembly",
        PickAndPlace => "pick and place",
        Kitting => "kitting",
        Sorting => "sorting",
        Packing => "packing",
        LoadingUnloading => "loading/unloading",
        Palletizing => "palletizing",
        Grasping => "grasping",
        Threading => "threading",
        Attaching => "attaching",
        InHandManipulation => "in hand manipulation",
        Pouring => "pouring",
        Insertion => "insertion",
        Welding => "welding",
        Cutting => "cutting",
        Grinding => "grinding",
        Spraying => "spraying",
        Soldering => "soldering",
        Sanding => "sanding",
        Drilling => "drilling",
        BoltingScrewing => "bolting/screwing",
        Sealing => "sealing",
        Measurement => "measurement",
        VisualInspection => "visual inspection",
        SensoryInspection => "sensory inspection",
        Scanning => "scanning",
        Transportation => "transportation",
        Docking => "docking",
        MachineTending => "machine tending",
        CollaborativeAssembly => "collaborative assembly",
        HumanHandover => "human handover",
        HumanSocialInteraction => "human social interaction",
        Cleaning => "cleaning",
        DefectDetection => "defect detection",
        Exploration => "exploration",
        Navigation => "navigation",
        LongHorizonPlanning => "long horizon planning",
        MultiTasking => "multi-tasking",
    }
}

vocabulary! {
    /// Robot skills a task may require.
    TaskSkill {
        ToolUse => "tool use",
        ForceControl => "force control",
        Localization => "localization",
        LongHorizonPlanning => "long horizon planning",
        GraspPlanning => "grasp planning",
        MotionPlanning => "motion planning",
        MultiTasking => "multi-tasking",
        ObjectRecognition => "object recognition",
        DeformableObjectHandling => "deformable object handling",
        BimanualManipulation => "bimanual manipulation",
        MobileManipulation => "mobile manipulation",
    }
}

vocabulary! {
    /// End-effector classes.
    Effector {
        Prehensile => "prehensile gripper",
        NonPrehensile => "non-prehensile gripper",
        Dextrous => "dextrous gripper",
    }
}

vocabulary! {
    /// Sensor modalities available on the deployment hardware.
    SensorType {
        Visual => "visual sensors",
        Audio => "audio sensors",
        Haptic => "haptic sensors",
        Thermal => "thermal sensors",
        Force => "force sensors",
        Torque => "torque sensors",
        Depth => "depth sensors",
    }
}

vocabulary! {
    /// Deployment setting categories.
    EnvironmentType {
        Industrial => "Industrial",
        Warehouse => "Warehouse",
        Corporate => "Corporate",
        Retail => "Retail",
        Home => "Home",
        Lab => "Lab",
        Hospital => "Hospital",
        Construction => "Construction",
        Agriculture => "Agriculture",
        Outdoor => "Outdoor",
        Other => "Other",
    }
}

vocabulary! {
    /// Robot embodiment required by the task.
    Embodiment {
        SingleArm => "single-arm",
        DualArm => "dual-arm",
        Mobile => "mobile",
        Stationary => "stationary",
        Aerial => "aerial",
        Other => "other",
    }
}

vocabulary! {
    /// Episode time horizon. short: seconds to under a minute,
    /// medium: 1-10 minutes, long: over 10 minutes or multi-stage.
    TimeHorizon {
        Short => "short",
        Medium => "medium",
        Long => "long",
    }
}

vocabulary! {
    /// Type of an environment state variable.
    StateVariableType {
        Continuous => "continuous",
        Discrete => "discrete",
        Categorical => "categorical",
        Nominal => "nominal",
        Ordinal => "ordinal",
        Binary => "binary",
        Integer => "integer",
        Float => "float",
        String => "string",
    }
}

vocabulary! {
    /// Axes along which the environment varies in deployment.
    GeneralizationAxis {
        Lighting => "lighting",
        FormFactor => "form factor",
        SkuVariance => "SKU variance",
        LayoutVariation => "layout variation",
        ObjectOcclusion => "object occlusion",
        HumanInteraction => "human interaction",
        Other => "other",
    }
}

vocabulary! {
    /// Expected variability of a generalization axis.
    Variability {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

vocabulary! {
    /// How much of the relevant state the sensors can observe.
    Observability {
        Partial => "partial",
        Full => "full",
        None => "none",
    }
}

vocabulary! {
    /// Failure modes a deployed policy can exhibit.
    FailureMode {
        PerceptionFailure => "Perception Failure",
        GraspingManipulationFailure => "Grasping/Manipulation Failure",
        PlanningFailure => "Planning Failure",
        TaskTimeout => "Task Timeout",
        EnvironmentFailure => "Environment Failure",
        ToolUseFailure => "Tool Use Failure",
        ActionExecutionFailure => "Action Execution Failure",
        SafetyViolation => "Safety Violation",
        PrematureTermination => "Premature Termination",
        RecoveryFailure => "Recovery Failure",
        HumanSocialInteractionFailure => "Human Social Interaction Failure",
        Other => "Other",
    }
}

vocabulary! {
    /// Research bottlenecks that block the skill capture.
    ResearchBottleneck {
        SceneUnderstanding => "scene understanding",
        ObjectRecognition => "object recognition",
        DeformableObjectHandling => "deformable object handling",
        PoseEstimation => "pose estimation",
        HumanObjectInteraction => "human-object interaction",
        LongTermPlanning => "long-term planning",
        MultiTaskObjectReasoning => "multi-task / object reasoning",
        BimanualInterrobotCoordination => "bimanual / interrobot coordination",
        MobileManipulation => "mobile manipulation",
        ToolUse => "tool use",
        PrecisionControl => "precision control",
        MemoryManagement => "memory management",
        SafetyAlignment => "safety alignment",
        ForceControl => "force control",
        NoiseAndUncertainty => "noise and uncertainty",
        RewardShapingSpecification => "reward shaping / specification",
        ActionLatencyTiming => "action latency / timing",
        Other => "other",
    }
}

vocabulary! {
    /// Data streams collected for learning, teleop, and validation.
    DataModality {
        Rgb => "rgb",
        EgocentricVideo => "egocentric video",
        ThirdPersonVideo => "third-person video",
        Tactile => "tactile",
        Lidar => "lidar",
        Radar => "radar",
        Ultrasonic => "ultrasonic",
        Audio => "audio",
        Haptics => "haptics",
        Thermal => "thermal",
        ForceTorque => "force_torque",
        Proprioception => "proprioception",
        Depth => "depth",
        Other => "other",
    }
}
